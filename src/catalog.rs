use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{FeeError, Result};
use crate::types::FeeStructure;

/// per-class fee schedule lookup.
///
/// Admin-owned and globally shared; every dues computation reads it. Updates
/// go through [`bulk_update`](FeeStructureCatalog::bulk_update) only, which is
/// all-or-nothing so readers never observe a half-updated schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeeStructureCatalog {
    structures: BTreeMap<String, FeeStructure>,
}

impl FeeStructureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// seed a catalog from an initial schedule; goes through the same
    /// all-or-nothing validation as a live update
    pub fn from_structures(structures: Vec<FeeStructure>) -> Result<Self> {
        let mut catalog = Self::new();
        catalog.bulk_update(structures)?;
        Ok(catalog)
    }

    pub fn lookup(&self, classname: &str) -> Option<&FeeStructure> {
        self.structures.get(classname)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.structures.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    /// base monthly fee plus bus fee for bus users
    pub fn effective_monthly_rate(structure: &FeeStructure, uses_bus: bool) -> Money {
        if uses_bus {
            structure.monthly_fee + structure.bus_fee
        } else {
            structure.monthly_fee
        }
    }

    /// replace the rows for every class in `updates`, atomically.
    ///
    /// The whole list is validated before any row is applied; a single bad
    /// row fails the entire update and leaves the catalog untouched.
    pub fn bulk_update(&mut self, updates: Vec<FeeStructure>) -> Result<()> {
        let failed_classes: Vec<String> = updates
            .iter()
            .filter(|s| !Self::is_valid(s))
            .map(|s| s.classname.clone())
            .collect();

        if !failed_classes.is_empty() {
            return Err(FeeError::BulkUpdateFailed { failed_classes });
        }

        for structure in updates {
            self.structures.insert(structure.classname.clone(), structure);
        }
        Ok(())
    }

    fn is_valid(structure: &FeeStructure) -> bool {
        !structure.classname.trim().is_empty()
            && !structure.monthly_fee.is_negative()
            && !structure.annual_fee.is_negative()
            && !structure.exam_fee.is_negative()
            && !structure.other_fee.is_negative()
            && !structure.fine.is_negative()
            && !structure.bus_fee.is_negative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structure(classname: &str, monthly: i64, bus: i64) -> FeeStructure {
        FeeStructure {
            classname: classname.to_string(),
            monthly_fee: Money::from_major(monthly),
            annual_fee: Money::from_major(1200),
            exam_fee: Money::from_major(300),
            other_fee: Money::from_major(150),
            fine: Money::from_major(50),
            bus_fee: Money::from_major(bus),
        }
    }

    #[test]
    fn test_lookup_and_rate() {
        let catalog =
            FeeStructureCatalog::from_structures(vec![structure("Three", 500, 100)]).unwrap();

        let found = catalog.lookup("Three").unwrap();
        assert_eq!(
            FeeStructureCatalog::effective_monthly_rate(found, true),
            Money::from_major(600)
        );
        assert_eq!(
            FeeStructureCatalog::effective_monthly_rate(found, false),
            Money::from_major(500)
        );
        assert!(catalog.lookup("Nursery").is_none());
    }

    #[test]
    fn test_bulk_update_replaces_rows() {
        let mut catalog =
            FeeStructureCatalog::from_structures(vec![structure("Three", 500, 100)]).unwrap();

        catalog
            .bulk_update(vec![structure("Three", 550, 100), structure("Four", 600, 120)])
            .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.lookup("Three").unwrap().monthly_fee,
            Money::from_major(550)
        );
    }

    #[test]
    fn test_bulk_update_all_or_nothing() {
        let mut catalog =
            FeeStructureCatalog::from_structures(vec![structure("Three", 500, 100)]).unwrap();

        let mut bad = structure("Four", 600, 120);
        bad.fine = Money::ZERO - Money::from_major(10);

        let err = catalog
            .bulk_update(vec![structure("Three", 999, 100), bad, structure("", 100, 0)])
            .unwrap_err();

        match err {
            FeeError::BulkUpdateFailed { failed_classes } => {
                assert_eq!(failed_classes, vec!["Four".to_string(), "".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }

        // nothing applied, including the valid "Three" row
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.lookup("Three").unwrap().monthly_fee,
            Money::from_major(500)
        );
    }
}
