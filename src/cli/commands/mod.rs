pub mod data;
pub mod expense;
pub mod report;
pub mod system;

use super::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = Vec::new();
    entries.extend(expense::definitions());
    entries.extend(report::definitions());
    entries.extend(data::definitions());
    entries.extend(system::definitions());
    for entry in entries {
        registry.register(entry);
    }
}
