use serde::{Deserialize, Serialize};

use bistro_core::{DomainError, DomainResult, Entity, MenuItemId, StockRecordId};
use bistro_menu::MenuItem;

/// Quantity on hand for one menu item.
///
/// The data model allows several records per item; nothing here assumes
/// uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: StockRecordId,
    /// Referenced menu item (serialized as `item`).
    #[serde(rename = "item")]
    pub menu_item_id: MenuItemId,
    pub quantity: i64,
}

impl Entity for StockRecord {
    type Id = StockRecordId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl StockRecord {
    /// Quantity after applying `delta`, without mutating the record.
    ///
    /// The sign of `delta` and of the result are not checked here; the
    /// store's non-negative column constraint is the only guard.
    pub fn adjusted_quantity(&self, delta: i64) -> DomainResult<i64> {
        self.quantity
            .checked_add(delta)
            .ok_or_else(|| DomainError::validation("stock quantity overflow"))
    }

    /// Apply an additive adjustment in place.
    pub fn apply(&mut self, cmd: &AdjustStock) -> DomainResult<()> {
        if cmd.stock_record_id != self.id {
            return Err(DomainError::validation(format!(
                "adjustment for stock record {} applied to {}",
                cmd.stock_record_id, self.id
            )));
        }
        self.quantity = self.adjusted_quantity(cmd.delta)?;
        Ok(())
    }

    /// Pair with the referenced item for display.
    pub fn line<'a>(&'a self, item: &'a MenuItem) -> StockLine<'a> {
        StockLine { record: self, item }
    }
}

/// Command: add `delta` to a stock record's quantity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustStock {
    pub stock_record_id: StockRecordId,
    pub delta: i64,
}

/// A stock record that has not been assigned an id yet (seeding/admin path).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStockRecord {
    pub menu_item_id: MenuItemId,
    pub quantity: i64,
}

impl NewStockRecord {
    pub fn into_record(self, id: StockRecordId) -> StockRecord {
        StockRecord {
            id,
            menu_item_id: self.menu_item_id,
            quantity: self.quantity,
        }
    }
}

/// Human-readable `"<item> - <quantity>"` view of a stock record.
#[derive(Debug, Clone, Copy)]
pub struct StockLine<'a> {
    record: &'a StockRecord,
    item: &'a MenuItem,
}

impl core::fmt::Display for StockLine<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} - {}", self.item.name, self.record.quantity)
    }
}
