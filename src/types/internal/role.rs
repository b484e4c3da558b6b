use std::fmt;

use crate::errors::internal::{InternalError, ValidationError};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Customer,
    Owner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Customer => "CUSTOMER",
            Role::Owner => "OWNER",
        }
    }

    /// Case-insensitive lookup by name
    pub fn parse(value: &str) -> Result<Self, InternalError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "CUSTOMER" => Ok(Role::Customer),
            "OWNER" => Ok(Role::Owner),
            _ => Err(ValidationError::invalid_status_name("role", value).into()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a CUSTOMER account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerStatus {
    Active,
    Suspended,
    Deleted,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "ACTIVE",
            CustomerStatus::Suspended => "SUSPENDED",
            CustomerStatus::Deleted => "DELETED",
        }
    }

    pub fn parse(value: &str) -> Result<Self, InternalError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(CustomerStatus::Active),
            "SUSPENDED" => Ok(CustomerStatus::Suspended),
            "DELETED" => Ok(CustomerStatus::Deleted),
            _ => Err(ValidationError::invalid_status_name("customer status", value).into()),
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of an OWNER account
///
/// New owners start PENDING and cannot log in until an admin approves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerStatus {
    Pending,
    Approved,
    Rejected,
    Suspended,
    Deleted,
}

impl OwnerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerStatus::Pending => "PENDING",
            OwnerStatus::Approved => "APPROVED",
            OwnerStatus::Rejected => "REJECTED",
            OwnerStatus::Suspended => "SUSPENDED",
            OwnerStatus::Deleted => "DELETED",
        }
    }

    pub fn parse(value: &str) -> Result<Self, InternalError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(OwnerStatus::Pending),
            "APPROVED" => Ok(OwnerStatus::Approved),
            "REJECTED" => Ok(OwnerStatus::Rejected),
            "SUSPENDED" => Ok(OwnerStatus::Suspended),
            "DELETED" => Ok(OwnerStatus::Deleted),
            _ => Err(ValidationError::invalid_status_name("owner status", value).into()),
        }
    }
}

impl fmt::Display for OwnerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
