//! Domain constants
//!
//! Syntax markers of raw constructor arguments.

/// Prefix marking a type reference (`@logger`)
pub const TYPE_REFERENCE_PREFIX: char = '@';

/// Marker following the prefix of an optional reference (`@?logger`)
pub const OPTIONAL_REFERENCE_MARKER: char = '?';

/// Separator between a type ID and an exposed member (`@logger::Log`)
pub const MEMBER_SEPARATOR: &str = "::";

/// Delimiter surrounding a configuration placeholder (`%db_host%`)
pub const PARAMETER_DELIMITER: char = '%';
