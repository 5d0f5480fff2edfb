use super::*;
use crate::editor::validate_code;

#[test]
fn six_templates_with_sequential_ids() {
    let ids: Vec<usize> = TEMPLATES.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn every_template_passes_code_validation() {
    for template in TEMPLATES {
        assert!(validate_code(template.code).is_ok(), "template {} fails validation", template.id);
        assert!(template.code.contains(template.name), "template {} code names another diagram", template.id);
    }
}

#[test]
fn lookup_by_id() {
    assert_eq!(by_id(3).map(|t| t.name), Some("Event Processing"));
    assert!(by_id(0).is_none());
    assert!(by_id(7).is_none());
}
