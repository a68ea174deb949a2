//! Category Handlers

pub(crate) mod all;
pub(crate) mod average_price;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use storefront_app::domain::categories::records::{
        CategoryNode, CategoryRecord, CategoryUuid,
    };

    pub(super) fn make_node(uuid: CategoryUuid, name: &str) -> CategoryNode {
        CategoryNode {
            record: CategoryRecord {
                uuid,
                parent_uuid: None,
                name: name.to_string(),
                description: None,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            parent_name: None,
            full_path: name.to_string(),
            children: Vec::new(),
        }
    }

    pub(super) fn make_child(parent: &CategoryNode, uuid: CategoryUuid, name: &str) -> CategoryNode {
        let mut child = make_node(uuid, name);

        child.record.parent_uuid = Some(parent.record.uuid);
        child.parent_name = Some(parent.record.name.clone());
        child.full_path = format!("{} > {name}", parent.full_path);

        child
    }
}
