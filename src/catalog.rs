//! Deprecated attributes that instrumentation SDKs are known to still emit.
//!
//! Each entry maps a deprecated attribute to its replacement. A `None`
//! replacement means the attribute was removed outright; it is still a known
//! deprecation and must not be confused with an attribute that is absent from
//! the catalog.

use std::collections::HashMap;
use std::sync::LazyLock;

/// `(deprecated, replacement)` in semantic-conventions release order.
const KNOWN_SDK_LAG: &[(&str, Option<&str>)] = &[
    // deployment (1.27.0)
    ("deployment.environment", Some("deployment.environment.name")),
    // database (1.26.0)
    ("db.statement", Some("db.query.text")),
    ("db.operation", Some("db.operation.name")),
    ("db.name", Some("db.namespace")),
    ("db.system", Some("db.system.name")),
    ("db.user", None),
    ("db.connection_string", Some("server.address + server.port")),
    ("db.instance.id", None),
    ("db.cassandra.table", Some("db.collection.name")),
    ("db.cassandra.consistency_level", Some("cassandra.consistency.level")),
    ("db.cassandra.coordinator.dc", Some("cassandra.coordinator.dc")),
    ("db.cassandra.coordinator.id", Some("cassandra.coordinator.id")),
    ("db.cassandra.idempotence", Some("cassandra.query.idempotent")),
    ("db.mongodb.collection", Some("db.collection.name")),
    ("db.cosmosdb.container", Some("db.collection.name")),
    (
        "db.cosmosdb.consistency_level",
        Some("azure.cosmosdb.consistency.level"),
    ),
    ("db.cosmosdb.operation_type", None),
    (
        "db.cosmosdb.regions_contacted",
        Some("azure.cosmosdb.operation.contacted_regions"),
    ),
    ("db.elasticsearch.cluster.name", Some("db.namespace")),
    ("db.elasticsearch.node.name", Some("elasticsearch.node.name")),
    ("db.redis.database_index", Some("db.namespace")),
    // messaging (1.26.0 / 1.27.0)
    ("messaging.operation", Some("messaging.operation.type")),
    (
        "messaging.kafka.consumer.group",
        Some("messaging.consumer.group.name"),
    ),
    (
        "messaging.kafka.destination.partition",
        Some("messaging.destination.partition.id"),
    ),
    ("messaging.kafka.message.offset", Some("messaging.kafka.offset")),
    (
        "messaging.eventhubs.consumer.group",
        Some("messaging.consumer.group.name"),
    ),
    (
        "messaging.rocketmq.client_group",
        Some("messaging.consumer.group.name"),
    ),
    (
        "messaging.servicebus.destination.subscription_name",
        Some("messaging.destination.subscription.name"),
    ),
    ("messaging.destination_publish.name", None),
    ("messaging.destination_publish.anonymous", None),
    ("messaging.client_id", Some("messaging.client.id")),
    // rpc (1.26.0)
    ("message.compressed_size", Some("rpc.message.compressed_size")),
    ("message.id", Some("rpc.message.id")),
    ("message.type", Some("rpc.message.type")),
    ("message.uncompressed_size", Some("rpc.message.uncompressed_size")),
    // end user
    ("enduser.role", Some("user.roles")),
    ("enduser.scope", None),
    // tls (1.27.0)
    ("tls.client.server_name", Some("server.address")),
];

static INDEX: LazyLock<HashMap<&'static str, Option<&'static str>>> =
    LazyLock::new(|| KNOWN_SDK_LAG.iter().copied().collect());

/// Replacement for a catalogued attribute.
///
/// Outer `None`: not in the catalog. `Some(None)`: known deprecation with no
/// replacement.
pub fn replacement_for(attribute: &str) -> Option<Option<&'static str>> {
    INDEX.get(attribute).copied()
}

pub fn is_known_lag(attribute: &str) -> bool {
    INDEX.contains_key(attribute)
}

/// All entries in table order.
pub fn entries() -> impl Iterator<Item = (&'static str, Option<&'static str>)> {
    KNOWN_SDK_LAG.iter().copied()
}

pub fn len() -> usize {
    KNOWN_SDK_LAG.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn replacement_lookup() {
        assert_eq!(replacement_for("db.statement"), Some(Some("db.query.text")));
        assert_eq!(replacement_for("enduser.scope"), Some(None));
        assert_eq!(replacement_for("totally.new.thing"), None);
    }

    #[test]
    fn removed_attributes_are_still_known() {
        assert!(is_known_lag("db.user"));
        assert!(is_known_lag("messaging.destination_publish.anonymous"));
        assert!(!is_known_lag("http.method"));
    }

    #[test]
    fn table_has_no_duplicate_keys() {
        assert_eq!(INDEX.len(), len());
        assert_eq!(entries().count(), len());
    }
}
