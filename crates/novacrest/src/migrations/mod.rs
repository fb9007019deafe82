mod m0001_catalog;
mod m0002_content;

use cetane::prelude::MigrationRegistry;

pub fn registry() -> MigrationRegistry {
    let mut reg = MigrationRegistry::new();
    reg.register(m0001_catalog::migration());
    reg.register(m0002_content::migration());
    reg
}
