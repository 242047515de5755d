use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::MedicineId;
use crate::domain::{Record, SortKey, contains_term};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    pub manufacturer: Option<String>,
    pub category: String,
    /// Price of one unit in minor currency units.
    pub unit_price: i64,
    pub stock: u32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Medicine {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[derive(Clone, Debug)]
pub struct NewMedicine {
    pub name: String,
    pub manufacturer: Option<String>,
    pub category: String,
    pub unit_price: i64,
    pub stock: u32,
}

impl NewMedicine {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        manufacturer: Option<String>,
        category: impl Into<String>,
        unit_price: i64,
        stock: u32,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            manufacturer: manufacturer
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            category: category.into().trim().to_string(),
            unit_price,
            stock,
        }
    }
}

pub type UpdateMedicine = NewMedicine;

impl Record for Medicine {
    type Id = MedicineId;
    type New = NewMedicine;
    type Update = UpdateMedicine;

    const KIND: &'static str = "medicine";

    fn id(&self) -> MedicineId {
        self.id
    }

    fn from_new(id: MedicineId, new: NewMedicine, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: new.name,
            manufacturer: new.manufacturer,
            category: new.category,
            unit_price: new.unit_price,
            stock: new.stock,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, update: UpdateMedicine, now: NaiveDateTime) {
        self.name = update.name;
        self.manufacturer = update.manufacturer;
        self.category = update.category;
        self.unit_price = update.unit_price;
        self.stock = update.stock;
        self.updated_at = now;
    }

    fn matches_search(&self, term: &str) -> bool {
        contains_term(&self.name, term)
            || self
                .manufacturer
                .as_deref()
                .is_some_and(|m| contains_term(m, term))
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        match key {
            "category" => self.category.eq_ignore_ascii_case(value.trim()),
            "inStock" => match value.trim().parse::<bool>() {
                Ok(wanted) => self.in_stock() == wanted,
                Err(_) => true,
            },
            _ => true,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "id" => Some(SortKey::Int(self.id.get().into())),
            "name" => Some(SortKey::text(&self.name)),
            "price" => Some(SortKey::Int(self.unit_price)),
            "stock" => Some(SortKey::Int(self.stock.into())),
            _ => None,
        }
    }
}
