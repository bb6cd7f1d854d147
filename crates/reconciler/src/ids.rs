//! Identifier allocation

use uuid::Uuid;

/// Width of the service-name segment of a resource id
pub const RESOURCE_NAME_WIDTH: usize = 6;

/// Source of globally unique tokens for service and route ids
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator {
    fn new_id(&mut self) -> String;
}

/// Random (v4) UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Build `API-<name>-<seq>` with the name cut or `_`-padded to six characters
pub fn resource_id(service_name: &str, seq: usize) -> String {
    format!("{}{:06}", resource_prefix(service_name), seq)
}

/// `API-<name>-`, the part of a resource id shared by one service
fn resource_prefix(service_name: &str) -> String {
    let name: String = if service_name.chars().count() > RESOURCE_NAME_WIDTH {
        service_name.chars().take(RESOURCE_NAME_WIDTH).collect()
    } else {
        format!("{:_<width$}", service_name, width = RESOURCE_NAME_WIDTH)
    };
    format!("API-{}-", name)
}

/// Next free sequence number for a service
///
/// Never below `existing.len() + 1`, and always past the highest sequence
/// already carried by an id with this service's prefix, so numbers freed by
/// removed entries are not handed out again.
pub fn next_sequence<'a, I>(service_name: &str, existing: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = resource_prefix(service_name);
    let mut count = 0;
    let mut highest = 0;
    for id in existing {
        count += 1;
        if let Some(seq) = id
            .strip_prefix(prefix.as_str())
            .and_then(|rest| rest.parse::<usize>().ok())
        {
            highest = highest.max(seq);
        }
    }
    count.max(highest) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_id_pads_short_names() {
        assert_eq!(resource_id("orders", 1), "API-orders-000001");
        assert_eq!(resource_id("order", 1), "API-order_-000001");
        assert_eq!(resource_id("acl", 12), "API-acl___-000012");
    }

    #[test]
    fn test_resource_id_truncates_long_names() {
        assert_eq!(resource_id("inventory-mgmt", 1), "API-invent-000001");
        assert_eq!(resource_id("inventory-mgmt", 123456), "API-invent-123456");
    }

    #[test]
    fn test_resource_id_counts_characters() {
        assert_eq!(resource_id("注文サービス管理", 3), "API-注文サービス-000003");
    }

    #[test]
    fn test_next_sequence_skips_used_numbers() {
        assert_eq!(next_sequence("orders", Vec::<&str>::new()), 1);
        assert_eq!(
            next_sequence("orders", ["API-orders-000001", "API-orders-000002"]),
            3
        );
        assert_eq!(
            next_sequence("orders", ["API-orders-000001", "API-orders-000003"]),
            4
        );
    }

    #[test]
    fn test_next_sequence_ignores_foreign_ids() {
        assert_eq!(
            next_sequence("orders", ["API-stock_-000009", "custom", "API-orders-abc"]),
            4
        );
    }

    #[test]
    fn test_uuid_generator_is_unique() {
        let mut ids = UuidGenerator;
        let a = ids.new_id();
        let b = ids.new_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
