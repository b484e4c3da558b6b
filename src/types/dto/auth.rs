use poem_openapi::types::multipart::Upload;
use poem_openapi::{Multipart, Object};
use serde::{Deserialize, Serialize};

use crate::types::db::user;
use crate::types::internal::{NewAccount, NewOwner, Session};

/// Signup body for administrators; phone is optional
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AdminSignupRequest {
    pub email: String,
    pub password: String,
    pub real_name: String,
    pub phone: Option<String>,
    pub nickname: Option<String>,
}

impl From<AdminSignupRequest> for NewAccount {
    fn from(body: AdminSignupRequest) -> Self {
        NewAccount {
            email: body.email,
            password: body.password,
            real_name: body.real_name,
            phone: body.phone,
            nickname: body.nickname,
        }
    }
}

/// Signup body for customers
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CustomerSignupRequest {
    pub email: String,
    pub password: String,
    pub real_name: String,
    /// Digits only
    pub phone: String,
    pub nickname: Option<String>,
}

impl From<CustomerSignupRequest> for NewAccount {
    fn from(body: CustomerSignupRequest) -> Self {
        NewAccount {
            email: body.email,
            password: body.password,
            real_name: body.real_name,
            phone: Some(body.phone),
            nickname: body.nickname,
        }
    }
}

/// Owner signup form, including the business registration PDF
#[derive(Multipart)]
pub struct OwnerSignupForm {
    pub email: String,
    pub password: String,
    pub real_name: String,
    pub phone: String,
    pub nickname: Option<String>,
    pub store_name: String,
    pub store_phone: String,
    pub road_address: String,
    pub detail_address: Option<String>,
    pub business_number: Option<String>,
    /// Business registration certificate (PDF)
    pub business_registration_doc: Upload,
}

impl OwnerSignupForm {
    /// Split the form into the account fields and the uploaded file
    pub fn into_parts(self) -> (NewOwner, Upload) {
        let owner = NewOwner {
            account: NewAccount {
                email: self.email,
                password: self.password,
                real_name: self.real_name,
                phone: Some(self.phone),
                nickname: self.nickname,
            },
            store_name: self.store_name,
            store_phone: self.store_phone,
            road_address: self.road_address,
            detail_address: self.detail_address,
            business_number: self.business_number,
        };
        (owner, self.business_registration_doc)
    }
}

/// Request model for login on any role endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of an account; never carries the password hash
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub id: i64,
    pub email: String,
    pub real_name: String,
    pub phone: Option<String>,
    pub nickname: Option<String>,
    /// ADMIN, CUSTOMER or OWNER
    pub role: String,
    /// Set for customers only
    pub customer_status: Option<String>,
    /// Set for owners only
    pub owner_status: Option<String>,
    pub store_name: Option<String>,
    pub store_phone: Option<String>,
    pub road_address: Option<String>,
    pub detail_address: Option<String>,
    pub business_number: Option<String>,
    /// URL of the uploaded business registration document
    pub business_registration_doc: Option<String>,
    /// Unix timestamp
    pub created_at: i64,
}

impl From<user::Model> for UserData {
    fn from(model: user::Model) -> Self {
        let customer_status = (model.role == "CUSTOMER").then(|| model.customer_status.clone());
        let owner_status = (model.role == "OWNER").then(|| model.owner_status.clone());

        UserData {
            id: model.id,
            email: model.email,
            real_name: model.real_name,
            phone: model.phone,
            nickname: model.nickname,
            role: model.role,
            customer_status,
            owner_status,
            store_name: model.store_name,
            store_phone: model.store_phone,
            road_address: model.road_address,
            detail_address: model.detail_address,
            business_number: model.business_number,
            business_registration_doc: model.business_registration_doc,
            created_at: model.created_at,
        }
    }
}

/// Token plus the account it was issued for
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginData {
    /// JWT access token
    pub token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Number of seconds until the token expires
    pub expires_in: i64,

    pub user: UserData,
}

impl LoginData {
    pub fn from_session(session: Session, expires_in: i64) -> Self {
        LoginData {
            token: session.token,
            token_type: "Bearer".to_string(),
            expires_in,
            user: session.user.into(),
        }
    }
}

/// `{status, message, data}` envelope around one account
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub status: u16,
    pub message: String,
    pub data: UserData,
}

impl UserEnvelope {
    pub fn ok(message: &str, user: user::Model) -> Self {
        Self {
            status: 200,
            message: message.to_string(),
            data: user.into(),
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginEnvelope {
    pub status: u16,
    pub message: String,
    pub data: LoginData,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserListEnvelope {
    pub status: u16,
    pub message: String,
    pub data: Vec<UserData>,
}

impl UserListEnvelope {
    pub fn ok(message: &str, users: Vec<user::Model>) -> Self {
        Self {
            status: 200,
            message: message.to_string(),
            data: users.into_iter().map(UserData::from).collect(),
        }
    }
}
