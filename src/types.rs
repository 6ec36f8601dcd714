/// Column header name.
/// Examples: `created_at`, `text`, `lang`
pub type ColumnName = String;
/// Raw cell value as read from the input table.
/// Examples: `2023-01-15 08:12:44`, `Habari za asubuhi`
pub type FieldValue = String;
/// Human-readable label of a sampling group (the specifier it was built from).
/// Examples: `23-01`, `2023-01-10:2023-01-20`, `wewe`
pub type GroupLabel = String;
/// Seed for the sampling random source.
/// Example: `42`
pub type Seed = u64;
