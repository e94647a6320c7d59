//! Record identifiers. The prefixes keep ids recognizable in logs and in the
//! admin UI; the uuid part makes them safe under concurrent submission, which
//! a timestamp alone is not.

use uuid::Uuid;

pub fn client_id() -> String {
    format!("client{}", Uuid::new_v4().simple())
}

pub fn product_id() -> String {
    format!("p{}", Uuid::new_v4().simple())
}

pub fn order_id() -> String {
    format!("cmd{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes() {
        assert!(client_id().starts_with("client"));
        assert!(product_id().starts_with('p'));
        assert!(order_id().starts_with("cmd"));
    }

    #[test]
    fn order_ids_do_not_collide() {
        let a = order_id();
        let b = order_id();
        assert_ne!(a, b);
    }
}
