// src/models/asset.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    #[serde(rename = "Equipamento")]
    Equipment,
    #[serde(rename = "Veículo")]
    Vehicle,
    #[serde(rename = "Software")]
    Software,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 3] = [Self::Equipment, Self::Vehicle, Self::Software];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equipment => "Equipamento",
            Self::Vehicle => "Veículo",
            Self::Software => "Software",
        }
    }

    /// Campos que passam a ser obrigatórios quando esta categoria é escolhida.
    pub fn required_fields(&self) -> &'static [AssetField] {
        match self {
            Self::Equipment => &[AssetField::SerialNumber, AssetField::Supplier],
            Self::Vehicle => &[AssetField::LicensePlate],
            Self::Software => &[AssetField::LicenseKey, AssetField::LicenseExpiration],
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetCategory {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|c| c.as_str() == value).ok_or(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum AssetStatus {
    #[serde(rename = "Ativo")]
    Active,
    #[serde(rename = "Em manutenção")]
    InMaintenance,
    #[serde(rename = "Inativo")]
    Inactive,
}

impl AssetStatus {
    pub const ALL: [AssetStatus; 3] = [Self::Active, Self::InMaintenance, Self::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Ativo",
            Self::InMaintenance => "Em manutenção",
            Self::Inactive => "Inativo",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|s| s.as_str() == value).ok_or(())
    }
}

// --- CAMPOS ---

// Todos os campos de um ativo, na ordem em que o formulário os exibe.
// Serve de chave de ordenação e de chave para os erros de campo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum AssetField {
    Id,
    Name,
    Category,
    Status,
    AcquisitionDate,
    Description,
    SerialNumber,
    Supplier,
    LicensePlate,
    LicenseKey,
    LicenseExpiration,
}

impl AssetField {
    pub const ALL: [AssetField; 11] = [
        Self::Id,
        Self::Name,
        Self::Category,
        Self::Status,
        Self::AcquisitionDate,
        Self::Description,
        Self::SerialNumber,
        Self::Supplier,
        Self::LicensePlate,
        Self::LicenseKey,
        Self::LicenseExpiration,
    ];

    /// Campos que só existem em uma das categorias.
    pub const VARIANT_SPECIFIC: [AssetField; 5] = [
        Self::SerialNumber,
        Self::Supplier,
        Self::LicensePlate,
        Self::LicenseKey,
        Self::LicenseExpiration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Category => "category",
            Self::Status => "status",
            Self::AcquisitionDate => "acquisitionDate",
            Self::Description => "description",
            Self::SerialNumber => "serialNumber",
            Self::Supplier => "supplier",
            Self::LicensePlate => "licensePlate",
            Self::LicenseKey => "licenseKey",
            Self::LicenseExpiration => "licenseExpiration",
        }
    }

    fn snake_name(&self) -> &'static str {
        match self {
            Self::AcquisitionDate => "acquisition_date",
            Self::SerialNumber => "serial_number",
            Self::LicensePlate => "license_plate",
            Self::LicenseKey => "license_key",
            Self::LicenseExpiration => "license_expiration",
            other => other.as_str(),
        }
    }

    /// Mensagem exibida quando o campo obrigatório está vazio.
    pub fn required_message(&self) -> &'static str {
        match self {
            Self::Id => "Identificador é obrigatório",
            Self::Name => "Nome é obrigatório",
            Self::Category => "Categoria é obrigatória",
            Self::Status => "Status é obrigatório",
            Self::AcquisitionDate => "Data de aquisição é obrigatória",
            Self::Description => "Descrição é obrigatória",
            Self::SerialNumber => "Número de série é obrigatório",
            Self::Supplier => "Fornecedor é obrigatório",
            Self::LicensePlate => "Placa é obrigatória",
            Self::LicenseKey => "Chave de licença é obrigatória",
            Self::LicenseExpiration => "Validade da licença é obrigatória",
        }
    }
}

impl fmt::Display for AssetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Aceita tanto "acquisitionDate" (JSON) quanto "acquisition_date" (nome Rust).
impl FromStr for AssetField {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == value || f.snake_name() == value)
            .ok_or(())
    }
}

// --- ATIVO ---

// Campos específicos de cada categoria. A tag `category` vive aqui, então
// um ativo nunca carrega campos de outra categoria.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(tag = "category")]
pub enum AssetDetails {
    #[serde(rename = "Equipamento")]
    Equipment {
        #[serde(rename = "serialNumber")]
        serial_number: String,
        supplier: String,
    },
    #[serde(rename = "Veículo")]
    Vehicle {
        #[serde(rename = "licensePlate")]
        license_plate: String,
    },
    #[serde(rename = "Software")]
    Software {
        #[serde(rename = "licenseKey")]
        license_key: String,
        #[serde(rename = "licenseExpiration")]
        license_expiration: String,
    },
}

impl AssetDetails {
    pub fn category(&self) -> AssetCategory {
        match self {
            Self::Equipment { .. } => AssetCategory::Equipment,
            Self::Vehicle { .. } => AssetCategory::Vehicle,
            Self::Software { .. } => AssetCategory::Software,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub status: AssetStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub acquisition_date: String,

    #[serde(flatten)]
    pub details: AssetDetails,

    // Carimbados pelo cliente no momento da requisição
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Asset {
    pub fn category(&self) -> AssetCategory {
        self.details.category()
    }

    /// Valor textual de um campo, usado pela ordenação.
    /// Campos de outra categoria (ou descrição ausente) retornam `None`.
    pub fn field_value(&self, field: AssetField) -> Option<&str> {
        match (field, &self.details) {
            (AssetField::Id, _) => Some(&self.id),
            (AssetField::Name, _) => Some(&self.name),
            (AssetField::Category, details) => Some(details.category().as_str()),
            (AssetField::Status, _) => Some(self.status.as_str()),
            (AssetField::AcquisitionDate, _) => Some(&self.acquisition_date),
            (AssetField::Description, _) => self.description.as_deref(),
            (AssetField::SerialNumber, AssetDetails::Equipment { serial_number, .. }) => {
                Some(serial_number)
            }
            (AssetField::Supplier, AssetDetails::Equipment { supplier, .. }) => Some(supplier),
            (AssetField::LicensePlate, AssetDetails::Vehicle { license_plate }) => {
                Some(license_plate)
            }
            (AssetField::LicenseKey, AssetDetails::Software { license_key, .. }) => {
                Some(license_key)
            }
            (AssetField::LicenseExpiration, AssetDetails::Software { license_expiration, .. }) => {
                Some(license_expiration)
            }
            _ => None,
        }
    }
}

// --- PATCH (PUT parcial) ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<AssetCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquisition_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_expiration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// Um ativo validado vira um patch completo (é o que o formulário de edição envia).
impl From<Asset> for AssetPatch {
    fn from(asset: Asset) -> Self {
        let category = asset.category();
        let mut patch = AssetPatch {
            name: Some(asset.name),
            category: Some(category),
            status: Some(asset.status),
            description: asset.description,
            acquisition_date: Some(asset.acquisition_date),
            updated_at: asset.updated_at,
            ..Default::default()
        };
        match asset.details {
            AssetDetails::Equipment { serial_number, supplier } => {
                patch.serial_number = Some(serial_number);
                patch.supplier = Some(supplier);
            }
            AssetDetails::Vehicle { license_plate } => {
                patch.license_plate = Some(license_plate);
            }
            AssetDetails::Software { license_key, license_expiration } => {
                patch.license_key = Some(license_key);
                patch.license_expiration = Some(license_expiration);
            }
        }
        patch
    }
}
