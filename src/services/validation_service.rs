// src/services/validation_service.rs

use uuid::Uuid;
use validator::Validate;

use crate::models::{
    asset::{Asset, AssetCategory, AssetDetails, AssetField, AssetStatus},
    form::{AssetFormInput, FieldErrors},
};

/// Converte o formulário bruto em um `Asset` tipado ou no conjunto completo
/// de erros de campo.
///
/// Os campos comuns são sempre validados. Os campos específicos só entram em
/// jogo quando a categoria é uma das três conhecidas, e todos os que faltarem
/// são reportados de uma vez. Campos de outras categorias são descartados.
pub fn validate(raw: &AssetFormInput, existing_id: Option<&str>) -> Result<Asset, FieldErrors> {
    let mut errors = match raw.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => FieldErrors::from(e),
    };

    let category = raw.selected_category();
    if let Some(category) = category {
        for field in category.required_fields() {
            if raw.value(*field).is_empty() {
                errors.add(*field, field.required_message());
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let (Some(category), Ok(status)) = (category, raw.status.parse::<AssetStatus>()) else {
        return Err(errors);
    };

    let details = match category {
        AssetCategory::Equipment => AssetDetails::Equipment {
            serial_number: raw.serial_number.clone(),
            supplier: raw.supplier.clone(),
        },
        AssetCategory::Vehicle => AssetDetails::Vehicle {
            license_plate: raw.license_plate.clone(),
        },
        AssetCategory::Software => AssetDetails::Software {
            license_key: raw.license_key.clone(),
            license_expiration: raw.license_expiration.clone(),
        },
    };

    let id = existing_id
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    Ok(Asset {
        id,
        name: raw.name.clone(),
        status,
        description: (!raw.description.is_empty()).then(|| raw.description.clone()),
        acquisition_date: raw.acquisition_date.clone(),
        details,
        created_at: None,
        updated_at: None,
    })
}

// ---
// Estado do formulário (criação/edição)
// ---
// Guarda os valores digitados e os erros exibidos. Trocar a categoria limpa
// só os erros dos campos que deixaram de valer, os valores ficam.
#[derive(Debug, Clone, Default)]
pub struct AssetFormState {
    values: AssetFormInput,
    errors: FieldErrors,
    editing_id: Option<String>,
}

impl AssetFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_asset(asset: &Asset) -> Self {
        Self {
            values: AssetFormInput::from(asset),
            errors: FieldErrors::new(),
            editing_id: Some(asset.id.clone()),
        }
    }

    pub fn values(&self) -> &AssetFormInput {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn set_value(&mut self, field: AssetField, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            AssetField::Category => return self.set_category(value),
            AssetField::Id => return,
            AssetField::Name => &mut self.values.name,
            AssetField::Status => &mut self.values.status,
            AssetField::AcquisitionDate => &mut self.values.acquisition_date,
            AssetField::Description => &mut self.values.description,
            AssetField::SerialNumber => &mut self.values.serial_number,
            AssetField::Supplier => &mut self.values.supplier,
            AssetField::LicensePlate => &mut self.values.license_plate,
            AssetField::LicenseKey => &mut self.values.license_key,
            AssetField::LicenseExpiration => &mut self.values.license_expiration,
        };
        *slot = value;
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.values.category = category.into();

        let Some(selected) = self.values.selected_category() else {
            return;
        };
        let keep = selected.required_fields();
        for field in AssetField::VARIANT_SPECIFIC {
            if !keep.contains(&field) {
                self.errors.remove(field);
            }
        }
    }

    /// Valida o formulário; em caso de falha os erros ficam guardados para exibição.
    pub fn submit(&mut self) -> Result<Asset, FieldErrors> {
        match validate(&self.values, self.editing_id.as_deref()) {
            Ok(asset) => {
                self.errors.clear();
                Ok(asset)
            }
            Err(errors) => {
                tracing::debug!("Formulário de ativo inválido: {}", errors);
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn common(category: &str) -> AssetFormInput {
        AssetFormInput {
            name: "Impressora".into(),
            category: category.into(),
            status: "Ativo".into(),
            acquisition_date: "2024-06-01".into(),
            ..Default::default()
        }
    }

    #[test]
    fn equipment_without_variant_fields_reports_both() {
        let errors = validate(&common("Equipamento"), None).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(AssetField::SerialNumber), Some("Número de série é obrigatório"));
        assert_eq!(errors.get(AssetField::Supplier), Some("Fornecedor é obrigatório"));
    }

    #[test]
    fn each_category_requires_exactly_its_own_fields() {
        let cases = [
            ("Equipamento", vec![AssetField::SerialNumber, AssetField::Supplier]),
            ("Veículo", vec![AssetField::LicensePlate]),
            ("Software", vec![AssetField::LicenseKey, AssetField::LicenseExpiration]),
        ];
        for (category, expected) in cases {
            let errors = validate(&common(category), None).unwrap_err();
            assert_eq!(errors.fields().collect::<Vec<_>>(), expected, "categoria {category}");
        }
    }

    #[test]
    fn fields_of_other_categories_are_not_required() {
        let mut input = common("Veículo");
        input.license_plate = "ABC1D23".into();

        let asset = validate(&input, None).unwrap();
        assert_eq!(asset.details, AssetDetails::Vehicle { license_plate: "ABC1D23".into() });
    }

    #[test]
    fn values_of_other_categories_are_dropped() {
        let mut input = common("Software");
        input.license_key = "LIC-123456".into();
        input.license_expiration = "2025-06-01".into();
        input.serial_number = "SN-1".into();
        input.license_plate = "XYZ".into();

        let asset = validate(&input, None).unwrap();
        assert_eq!(
            asset.details,
            AssetDetails::Software {
                license_key: "LIC-123456".into(),
                license_expiration: "2025-06-01".into(),
            }
        );
        assert_eq!(asset.field_value(AssetField::SerialNumber), None);
    }

    #[test]
    fn unknown_category_only_reports_common_errors() {
        let input = AssetFormInput { status: "Ativo".into(), ..Default::default() };
        let errors = validate(&input, None).unwrap_err();

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![AssetField::Name, AssetField::Category, AssetField::AcquisitionDate]
        );
        assert_eq!(errors.get(AssetField::Category), Some("Categoria é obrigatória"));

        let mut input = common("Móvel");
        input.serial_number.clear();
        let errors = validate(&input, None).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![AssetField::Category]);
        assert_eq!(errors.get(AssetField::Category), Some("Categoria inválida"));
    }

    #[test]
    fn common_and_variant_errors_come_together() {
        let mut input = common("Equipamento");
        input.name.clear();
        input.status = "Quebrado".into();
        input.supplier = "HP".into();

        let errors = validate(&input, None).unwrap_err();
        assert_eq!(errors.get(AssetField::Name), Some("Nome é obrigatório"));
        assert_eq!(errors.get(AssetField::Status), Some("Status inválido"));
        assert_eq!(errors.get(AssetField::SerialNumber), Some("Número de série é obrigatório"));
        assert!(!errors.contains(AssetField::Supplier));
    }

    #[test]
    fn new_assets_get_fresh_ids_and_edits_keep_theirs() {
        let mut input = common("Veículo");
        input.license_plate = "ABC1D23".into();

        let first = validate(&input, None).unwrap();
        let second = validate(&input, None).unwrap();
        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);

        let edited = validate(&input, Some("42")).unwrap();
        assert_eq!(edited.id, "42");
    }

    #[test]
    fn empty_description_becomes_none() {
        let mut input = common("Veículo");
        input.license_plate = "ABC1D23".into();
        assert_eq!(validate(&input, None).unwrap().description, None);

        input.description = "Frota".into();
        assert_eq!(validate(&input, None).unwrap().description.as_deref(), Some("Frota"));
    }

    #[test]
    fn changing_category_clears_stale_variant_errors() {
        let mut form = AssetFormState::new();
        form.set_value(AssetField::Name, "Impressora");
        form.set_value(AssetField::Status, "Ativo");
        form.set_value(AssetField::AcquisitionDate, "2024-06-01");
        form.set_category("Equipamento");
        form.set_value(AssetField::SerialNumber, "SN-1");

        assert!(form.submit().is_err());
        assert!(form.errors().contains(AssetField::Supplier));

        form.set_category("Software");
        assert!(!form.errors().contains(AssetField::Supplier));
        assert!(!form.errors().contains(AssetField::SerialNumber));
        // o valor digitado continua guardado
        assert_eq!(form.values().serial_number, "SN-1");
    }

    #[test]
    fn clearing_category_keeps_existing_errors() {
        let mut form = AssetFormState::new();
        form.set_category("Veículo");
        assert!(form.submit().is_err());
        assert!(form.errors().contains(AssetField::LicensePlate));

        form.set_category("");
        assert!(form.errors().contains(AssetField::LicensePlate));
    }

    #[test]
    fn editing_form_round_trips_the_asset() {
        let mut input = common("Equipamento");
        input.serial_number = "SN-7".into();
        input.supplier = "Dell".into();
        let asset = validate(&input, Some("7")).unwrap();

        let mut form = AssetFormState::for_asset(&asset);
        assert!(form.is_editing());
        form.set_value(AssetField::Name, "Impressora laser");

        let updated = form.submit().unwrap();
        assert_eq!(updated.id, "7");
        assert_eq!(updated.name, "Impressora laser");
        assert_eq!(updated.details, asset.details);
        assert!(form.errors().is_empty());
    }
}
