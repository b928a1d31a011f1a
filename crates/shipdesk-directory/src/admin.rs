use serde::{Deserialize, Serialize};
use serde_json::Value;
use shipdesk_types::Record;

/// The administrator account seeded into an empty directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminProfile {
    pub nombre: String,
    pub apellido: String,
    pub ciudad: String,
    pub telefono: String,
    pub correo: String,
    pub usuario: String,
    pub contrasena: String,
    pub rol: String,
}

impl Default for AdminProfile {
    fn default() -> Self {
        Self {
            nombre: "Administrador".into(),
            apellido: String::new(),
            ciudad: "Ciudad Admin".into(),
            telefono: String::new(),
            correo: "admin@shalom.com".into(),
            usuario: "admin".into(),
            contrasena: "admin123".into(),
            rol: "Administrador de logística".into(),
        }
    }
}

impl AdminProfile {
    /// The profile as a user record, fields in their persisted order.
    pub fn to_record(&self) -> Record {
        [
            ("nombre", &self.nombre),
            ("apellido", &self.apellido),
            ("ciudad", &self.ciudad),
            ("telefono", &self.telefono),
            ("correo", &self.correo),
            ("usuario", &self.usuario),
            ("contrasena", &self.contrasena),
            ("rol", &self.rol),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.clone())))
        .collect()
    }
}
