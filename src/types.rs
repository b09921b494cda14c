use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::format;

/// Fixed column order for record rows: 28 named fields, the server
/// timestamp is appended as the 29th value.
pub const ROW_COLUMNS: [&str; 28] = [
    "razaoSocial",
    "cnpj",
    "endereco",
    "bairro",
    "cidade",
    "uf",
    "cep",
    "telefone",
    "celular",
    "emailEmpresa",
    "banco",
    "agencia",
    "conta",
    "pix",
    "nomeSocio",
    "cpf",
    "rg",
    "orgaoExpedidor",
    "dataEmissao",
    "nascimento",
    "nacionalidade",
    "estadoCivil",
    "profissao",
    "emailSocio",
    "enderecoSocio",
    "bairroSocio",
    "cidadeSocio",
    "ufSocio",
];

/// Total width of a record row (named fields + timestamp).
pub const ROW_WIDTH: usize = ROW_COLUMNS.len() + 1;

/// Inbound webhook body: `{ "data": { <field>: <value>, ... } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub data: Submission,
}

/// One form submission: an ordered field-name → value map.
///
/// No schema is enforced beyond named lookups; absent, null and structured
/// values read as empty strings. Field order is preserved as received
/// (the spreadsheet export iterates in this order).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission {
    fields: Map<String, Value>,
}

impl Submission {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Scalar text for a field: strings pass through, numbers and booleans
    /// stringify, everything else (absent, null, object, array) is empty.
    pub fn text(&self, name: &str) -> String {
        match self.fields.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    pub fn set_text(&mut self, name: &str, value: String) {
        self.fields.insert(name.to_string(), Value::String(value));
    }

    /// Deduplication key over (cnpj, razaoSocial, emailEmpresa), stripped
    /// of every non-alphanumeric character.
    pub fn fingerprint(&self) -> String {
        format::fingerprint(
            &self.text("cnpj"),
            &self.text("razaoSocial"),
            &self.text("emailEmpresa"),
        )
    }

    /// Base name shared by both generated artifacts:
    /// `"{razaoSocial} - {cnpj}"`, falling back to `"Cliente"` when the
    /// company name is missing.
    pub fn base_name(&self) -> String {
        let razao = self.text("razaoSocial");
        let razao = if razao.is_empty() {
            "Cliente".to_string()
        } else {
            razao
        };
        format!("{} - {}", razao, self.text("cnpj"))
    }

    /// Build the record row: the 28 fixed columns followed by the
    /// server-assigned timestamp.
    pub fn row_values(&self, stamped_at: DateTime<Utc>) -> Vec<String> {
        let mut row: Vec<String> = ROW_COLUMNS.iter().map(|c| self.text(c)).collect();
        row.push(stamped_at.to_rfc3339());
        row
    }

    /// Scalar fields in insertion order, skipping structured values
    /// (objects, arrays) and nulls. Used by the spreadsheet exporter.
    pub fn scalar_fields(&self) -> impl Iterator<Item = (&str, String)> {
        self.fields.iter().filter_map(|(name, value)| match value {
            Value::Object(_) | Value::Array(_) | Value::Null => None,
            Value::String(s) => Some((name.as_str(), s.clone())),
            Value::Number(n) => Some((name.as_str(), n.to_string())),
            Value::Bool(b) => Some((name.as_str(), b.to_string())),
        })
    }
}
