use serde::{Deserialize, Serialize};

use bistro_core::{DomainError, DomainResult, Entity, MenuItemId, Money};

/// Upper bound on a menu item name, matching the relational column width.
pub const MAX_NAME_LEN: usize = 255;

/// A purchasable item on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: Money,
}

impl Entity for MenuItem {
    type Id = MenuItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl core::fmt::Display for MenuItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A menu item that has not been assigned an id yet (seeding/admin path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub price: Money,
}

impl NewMenuItem {
    pub fn new(name: impl Into<String>, price: Money) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation(format!(
                "name cannot exceed {MAX_NAME_LEN} characters"
            )));
        }
        Ok(Self { name, price })
    }

    /// Attach the store-assigned id.
    pub fn into_item(self, id: MenuItemId) -> MenuItem {
        MenuItem {
            id,
            name: self.name,
            price: self.price,
        }
    }
}
