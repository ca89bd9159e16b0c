// src/models/form.rs

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::asset::{Asset, AssetCategory, AssetDetails, AssetField, AssetStatus};

// ---
// Validação Customizada
// ---
fn required_choice<T: std::str::FromStr>(
    value: &str,
    required: &'static str,
    invalid: &'static str,
) -> Result<(), ValidationError> {
    let (code, message) = if value.is_empty() {
        ("required", required)
    } else if value.parse::<T>().is_err() {
        ("invalid_choice", invalid)
    } else {
        return Ok(());
    };
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    Err(err)
}

fn validate_category(value: &str) -> Result<(), ValidationError> {
    required_choice::<AssetCategory>(value, "Categoria é obrigatória", "Categoria inválida")
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    required_choice::<AssetStatus>(value, "Status é obrigatório", "Status inválido")
}

// ---
// Payload: formulário bruto do ativo
// ---
// Todos os campos chegam como texto, inclusive os de outras categorias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetFormInput {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: String,

    #[validate(custom(function = "validate_category"))]
    pub category: String,

    #[validate(custom(function = "validate_status"))]
    pub status: String,

    pub description: String,

    #[validate(length(min = 1, message = "Data de aquisição é obrigatória"))]
    pub acquisition_date: String,

    pub serial_number: String,
    pub supplier: String,
    pub license_plate: String,
    pub license_key: String,
    pub license_expiration: String,
}

impl AssetFormInput {
    pub fn value(&self, field: AssetField) -> &str {
        match field {
            AssetField::Id => "",
            AssetField::Name => &self.name,
            AssetField::Category => &self.category,
            AssetField::Status => &self.status,
            AssetField::AcquisitionDate => &self.acquisition_date,
            AssetField::Description => &self.description,
            AssetField::SerialNumber => &self.serial_number,
            AssetField::Supplier => &self.supplier,
            AssetField::LicensePlate => &self.license_plate,
            AssetField::LicenseKey => &self.license_key,
            AssetField::LicenseExpiration => &self.license_expiration,
        }
    }

    /// Categoria escolhida, se for uma das três conhecidas.
    pub fn selected_category(&self) -> Option<AssetCategory> {
        self.category.parse().ok()
    }
}

// Preenche o formulário de edição a partir de um ativo existente.
impl From<&Asset> for AssetFormInput {
    fn from(asset: &Asset) -> Self {
        let mut input = AssetFormInput {
            name: asset.name.clone(),
            category: asset.category().as_str().to_string(),
            status: asset.status.as_str().to_string(),
            description: asset.description.clone().unwrap_or_default(),
            acquisition_date: asset.acquisition_date.clone(),
            ..Default::default()
        };
        match &asset.details {
            AssetDetails::Equipment { serial_number, supplier } => {
                input.serial_number = serial_number.clone();
                input.supplier = supplier.clone();
            }
            AssetDetails::Vehicle { license_plate } => {
                input.license_plate = license_plate.clone();
            }
            AssetDetails::Software { license_key, license_expiration } => {
                input.license_key = license_key.clone();
                input.license_expiration = license_expiration.clone();
            }
        }
        input
    }
}

// --- ERROS DE CAMPO ---

/// Uma mensagem por campo, na ordem dos campos do formulário.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<AssetField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    // A primeira mensagem registrada para o campo prevalece.
    pub fn add(&mut self, field: AssetField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: AssetField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: AssetField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn remove(&mut self, field: AssetField) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = AssetField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetField, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut result = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            let Ok(field) = field.parse::<AssetField>() else {
                tracing::warn!("Erro de validação em campo desconhecido: {}", field);
                continue;
            };
            let message = field_errors
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| field.required_message().to_string());
            result.add(field, message);
        }
        result
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> =
            self.iter().map(|(field, message)| format!("{field}: {message}")).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}
