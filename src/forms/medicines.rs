use serde::Deserialize;
use validator::Validate;

use crate::domain::medicine::{NewMedicine, UpdateMedicine};
use crate::domain::types::non_empty;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for adding or editing a medicine in the catalogue.
pub struct MedicineForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    /// Price of one unit in minor currency units.
    #[validate(range(min = 0))]
    pub unit_price: i64,
    #[serde(default)]
    pub stock: u32,
}

impl MedicineForm {
    pub fn to_new_medicine(&self) -> Result<NewMedicine, FormError> {
        self.validate()?;
        Ok(NewMedicine::new(
            non_empty(self.name.as_str())?,
            self.manufacturer.clone(),
            non_empty(self.category.as_str())?,
            self.unit_price,
            self.stock,
        ))
    }

    pub fn to_update_medicine(&self) -> Result<UpdateMedicine, FormError> {
        self.to_new_medicine()
    }
}
