//! Department records
//!
//! Flat records persisted alongside the ledger. They carry no derived state and
//! never take part in balance computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type DepartmentId = String;

/// A study or business line inside a department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specialization {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_students: Option<u32>,
    #[serde(default)]
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub manager: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub budget: Decimal,
    #[serde(default)]
    pub expenses: Decimal,
    #[serde(default)]
    pub specializations: Vec<Specialization>,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Department {
    pub fn from_draft(id: DepartmentId, draft: DepartmentDraft) -> Self {
        Department {
            id,
            name: draft.name,
            manager: draft.manager,
            description: draft.description,
            budget: draft.budget,
            expenses: draft.expenses,
            specializations: draft.specializations,
            is_deleted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DepartmentDraft {
    pub name: String,
    pub manager: String,
    pub description: String,
    pub budget: Decimal,
    pub expenses: Decimal,
    pub specializations: Vec<Specialization>,
}

/// A single allowed field change on a department
#[derive(Debug, Clone, PartialEq)]
pub enum DepartmentUpdate {
    Name(String),
    Manager(String),
    Description(String),
    Budget(Decimal),
    Expenses(Decimal),
    Specializations(Vec<Specialization>),
}

impl DepartmentUpdate {
    pub fn apply(self, department: &mut Department) {
        match self {
            DepartmentUpdate::Name(name) => department.name = name,
            DepartmentUpdate::Manager(manager) => department.manager = manager,
            DepartmentUpdate::Description(description) => department.description = description,
            DepartmentUpdate::Budget(budget) => department.budget = budget,
            DepartmentUpdate::Expenses(expenses) => department.expenses = expenses,
            DepartmentUpdate::Specializations(specializations) => {
                department.specializations = specializations
            }
        }
    }
}
