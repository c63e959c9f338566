use crate::error::ScrapeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque listing token pulled from the index frame
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingIdentifier(String);

impl ListingIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One output column and the positional index attribute that locates it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLocator {
    pub name: String,
    pub index: u32,
}

impl FieldLocator {
    pub fn new(name: impl Into<String>, index: u32) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

/// Ordered column -> locator mapping. Order is the output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(Vec<FieldLocator>);

impl FieldMap {
    pub fn new(locators: Vec<FieldLocator>) -> Self {
        Self(locators)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldLocator> {
        self.0.iter()
    }

    pub fn columns(&self) -> Vec<String> {
        self.0.iter().map(|l| l.name.clone()).collect()
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        const FIELDS: [(&str, u32); 22] = [
            ("HouseType", 393),
            ("Address", 159),
            ("PostalCode", 160),
            ("SalePrice", 163),
            ("Bedrooms", 168),
            ("Bathrooms", 169),
            ("YearBuilt", 172),
            ("Age", 173),
            ("Zoning", 174),
            ("GrossTaxes", 175),
            ("LotAreaSqft", 166),
            ("FloodPlain", 289),
            ("View", 288),
            ("FrontageFt", 167),
            ("DepthSizeFt", 165),
            ("Parking", 380),
            ("FinishedFloorTotalSqft", 239),
            ("Suite", 381),
            ("Basement", 386),
            ("DistToTransit", 269),
            ("DistToSchoolBus", 270),
            ("SoldDate", 266),
        ];

        Self(
            FIELDS
                .iter()
                .map(|(name, index)| FieldLocator::new(*name, *index))
                .collect(),
        )
    }
}

/// Extracted values for a single listing, in field map order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: ListingIdentifier,
    pub values: Vec<String>,
}

/// All scraped listings, rows in enumeration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<ListingRecord>,
}

impl ResultTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn for_fields(field_map: &FieldMap) -> Self {
        Self::new(field_map.columns())
    }

    /// Append a record. Every row must be exactly as wide as the header.
    pub fn push(&mut self, record: ListingRecord) -> Result<(), ScrapeError> {
        if record.values.len() != self.columns.len() {
            return Err(ScrapeError::Table {
                id: record.id.to_string(),
                expected: self.columns.len(),
                found: record.values.len(),
            });
        }
        self.rows.push(record);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[ListingRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
