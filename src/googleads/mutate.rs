use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

use super::CustomerId;

/// The entity kinds this server ever mutates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Entity {
    CampaignBudget,
    Campaign,
    AdGroup,
    AdGroupAd,
    AdGroupCriterion,
}

impl Entity {
    /// Key wrapping this entity's operation in a mutate request.
    pub fn operation_key(self) -> &'static str {
        match self {
            Entity::CampaignBudget => "campaignBudgetOperation",
            Entity::Campaign => "campaignOperation",
            Entity::AdGroup => "adGroupOperation",
            Entity::AdGroupAd => "adGroupAdOperation",
            Entity::AdGroupCriterion => "adGroupCriterionOperation",
        }
    }

    /// Key identifying this entity's entry in a mutate response.
    pub fn result_key(self) -> &'static str {
        match self {
            Entity::CampaignBudget => "campaignBudgetResult",
            Entity::Campaign => "campaignResult",
            Entity::AdGroup => "adGroupResult",
            Entity::AdGroupAd => "adGroupAdResult",
            Entity::AdGroupCriterion => "adGroupCriterionResult",
        }
    }

    /// Path segment for this entity's collection in resource names.
    pub fn collection(self) -> &'static str {
        match self {
            Entity::CampaignBudget => "campaignBudgets",
            Entity::Campaign => "campaigns",
            Entity::AdGroup => "adGroups",
            Entity::AdGroupAd => "adGroupAds",
            Entity::AdGroupCriterion => "adGroupCriteria",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperationKind {
    Create,
    Update,
}

impl OperationKind {
    pub fn wire_key(self) -> &'static str {
        match self {
            OperationKind::Create => "create",
            OperationKind::Update => "update",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MutateOperation {
    pub entity: Entity,
    pub kind: OperationKind,
    pub resource: Value,
    pub update_mask: Option<String>,
}

/// Builder for a single atomic mutation batch. Forward references between
/// operations in the same batch go through placeholder resource names with
/// negative local ids; the platform resolves them to real ids at submission.
#[derive(Debug)]
pub struct MutateBatch {
    customer_id: CustomerId,
    next_temporary_id: i64,
    operations: Vec<MutateOperation>,
}

impl MutateBatch {
    pub fn new(customer_id: CustomerId) -> MutateBatch {
        MutateBatch {
            customer_id,
            next_temporary_id: -1,
            operations: vec![],
        }
    }

    /// Allocates a placeholder resource name for an entity created later in
    /// this same batch.
    pub fn allocate_temporary_name(&mut self, entity: Entity) -> String {
        let name = format!(
            "customers/{}/{}/{}",
            self.customer_id,
            entity.collection(),
            self.next_temporary_id
        );
        self.next_temporary_id -= 1;

        name
    }

    pub fn create(&mut self, entity: Entity, resource: &impl Serialize) -> Result<(), Error> {
        let resource = serde_json::to_value(resource)?;
        self.operations.push(MutateOperation {
            entity,
            kind: OperationKind::Create,
            resource,
            update_mask: None,
        });

        Ok(())
    }

    pub fn update(&mut self, entity: Entity, resource: &impl Serialize) -> Result<(), Error> {
        let resource = serde_json::to_value(resource)?;
        let update_mask = match &resource {
            Value::Object(fields) => Some(
                fields
                    .keys()
                    .filter(|key| key.as_str() != "resource_name")
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            _ => None,
        };
        self.operations.push(MutateOperation {
            entity,
            kind: OperationKind::Update,
            resource,
            update_mask,
        });

        Ok(())
    }

    pub fn into_operations(self) -> Vec<MutateOperation> {
        self.operations
    }
}
