use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "MASTER")]
    Master,
    #[serde(rename = "OPERARIO")]
    Operario,
}

/// Trade tag used to group workers in listings. Display only; scheduling
/// never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specialty {
    #[serde(rename = "Ingeniero")]
    Ingeniero,
    #[serde(rename = "Electricista")]
    Electricista,
    #[serde(rename = "Herrero")]
    Herrero,
    #[serde(rename = "Oficial Montador")]
    OficialMontador,
    #[serde(rename = "Montador")]
    Montador,
    #[serde(rename = "Camionero")]
    Camionero,
    #[serde(rename = "Operario Almacén")]
    Almacen,
}

impl Specialty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Ingeniero => "Ingeniero",
            Specialty::Electricista => "Electricista",
            Specialty::Herrero => "Herrero",
            Specialty::OficialMontador => "Oficial Montador",
            Specialty::Montador => "Montador",
            Specialty::Camionero => "Camionero",
            Specialty::Almacen => "Operario Almacén",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    /// Stored verbatim; stripped from API responses via [`User::sanitized`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<Specialty>,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        username: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            username: username.into(),
            password: None,
            role,
            specialty: None,
        }
    }

    pub fn is_master(&self) -> bool {
        self.role == UserRole::Master
    }

    /// Accounts without a stored password accept any supplied one.
    pub fn accepts_password(&self, supplied: &str) -> bool {
        match &self.password {
            Some(stored) => stored == supplied,
            None => true,
        }
    }

    /// Copy of the user with the password removed, for outbound payloads.
    pub fn sanitized(&self) -> User {
        User {
            password: None,
            ..self.clone()
        }
    }
}
