//! Built-in starter diagrams.

#[cfg(test)]
#[path = "templates_test.rs"]
mod templates_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// 1-based, stable across releases.
    pub id: usize,
    pub name: &'static str,
    pub description: &'static str,
    pub preview: &'static str,
    pub code: &'static str,
}

pub const TEMPLATES: &[Template] = &[
    Template {
        id: 1,
        name: "Grouped Workers",
        description: "Load balancer spreading traffic across workers that share one database",
        preview: "ELB → [EC2 workers] → RDS",
        code: r#"with Diagram("Grouped Workers", show=False, direction="TB"):
    ELB("lb") >> [EC2("worker1"),
                  EC2("worker2"),
                  EC2("worker3"),
                  EC2("worker4"),
                  EC2("worker5")] >> RDS("events")"#,
    },
    Template {
        id: 2,
        name: "Clustered Web Services",
        description: "DNS and load balancer in front of clustered services with cache and a database cluster",
        preview: "Route53 → ELB → [ECS Services] → RDS Cluster + Cache",
        code: r#"with Diagram("Clustered Web Services", show=False):
    dns = Route53("dns")
    lb = ELB("lb")

    with Cluster("Services"):
        svc_group = [ECS("web1"),
                     ECS("web2"),
                     ECS("web3")]

    with Cluster("DB Cluster"):
        db_primary = RDS("userdb")
        db_primary - [RDS("userdb ro")]

    memcached = ElastiCache("memcached")

    dns >> lb >> svc_group
    svc_group >> db_primary
    svc_group >> memcached"#,
    },
    Template {
        id: 3,
        name: "Event Processing",
        description: "Kubernetes source feeding workers, a queue, and Lambda handlers",
        preview: "EKS → ECS Workers → SQS → Lambda → S3/Redshift",
        code: r#"with Diagram("Event Processing", show=False):
    source = EKS("k8s source")

    with Cluster("Event Flows"):
        with Cluster("Event Workers"):
            workers = [ECS("worker1"),
                       ECS("worker2"),
                       ECS("worker3")]

        queue = SQS("event queue")

        with Cluster("Processing"):
            handlers = [Lambda("proc1"),
                        Lambda("proc2"),
                        Lambda("proc3")]

    store = S3("events store")
    dw = Redshift("analytics")

    source >> workers >> queue >> handlers
    handlers >> store
    handlers >> dw"#,
    },
    Template {
        id: 4,
        name: "Message Collecting",
        description: "IoT devices publishing through Pub/Sub into a data flow with several sinks",
        preview: "IoT Core → PubSub → DataFlow → BigQuery/GCS/AppEngine",
        code: r#"with Diagram("Message Collecting", show=False):
    pubsub = PubSub("pubsub")

    with Cluster("Source of Data"):
        [IotCore("core1"),
         IotCore("core2"),
         IotCore("core3")] >> pubsub

    with Cluster("Targets"):
        with Cluster("Data Flow"):
            flow = Dataflow("data flow")

        with Cluster("Data Lake"):
            flow >> [BigQuery("bq"),
                     GCS("storage")]

        with Cluster("Event Driven"):
            with Cluster("Processing"):
                flow >> AppEngine("engine") >> BigTable("bigtable")

            with Cluster("Serverless"):
                flow >> Functions("func") >> AppEngine("appengine")

    pubsub >> flow"#,
    },
    Template {
        id: 5,
        name: "Advanced Web Service with On-Premises",
        description: "On-premises web service with HA stores, monitoring, and a streaming pipeline",
        preview: "Nginx → [gRPC Services] → Redis HA + PostgreSQL HA → Kafka → Spark",
        code: r#"with Diagram("Advanced Web Service with On-Premises", show=False):
    ingress = Nginx("ingress")

    metrics = Prometheus("metric")
    metrics << Grafana("monitoring")

    with Cluster("Service Cluster"):
        grpcsvc = [
            Server("grpc1"),
            Server("grpc2"),
            Server("grpc3")]

    with Cluster("Sessions HA"):
        primary = Redis("session")
        primary - Redis("replica") << metrics
        grpcsvc >> primary

    with Cluster("Database HA"):
        primary = PostgreSQL("users")
        primary - PostgreSQL("replica") << metrics
        grpcsvc >> primary

    aggregator = Fluentd("logging")
    aggregator >> Kafka("stream") >> Spark("analytics")

    ingress >> grpcsvc >> aggregator"#,
    },
    Template {
        id: 6,
        name: "Stateful Architecture",
        description: "StatefulSet pods with persistent volume claims backed by a storage class",
        preview: "Service → [Pods + PVC] ← StatefulSet ← PV ← StorageClass",
        code: r#"with Diagram("Stateful Architecture", show=False):
    with Cluster("Apps"):
        svc = Service("svc")
        sts = StatefulSet("sts")

        apps = []
        for _ in range(3):
            pod = Pod("pod")
            pvc = PVC("pvc")
            pod - sts - pvc
            apps.append(svc >> pod >> pvc)

    apps << PV("pv") << StorageClass("sc")"#,
    },
];

/// Look up a template by its 1-based id.
#[must_use]
pub fn by_id(id: usize) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}
