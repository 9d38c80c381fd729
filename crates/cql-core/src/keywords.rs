//! Reserved CQL keywords.
//!
//! A keyword used as a table, column or keyspace name must be double-quoted.
//! Lookups are case-insensitive; the table is built once per process.

use lazy_static::lazy_static;
use std::collections::HashSet;

/// Keywords reserved by CQL 3, in upper case
const RESERVED: &[&str] = &[
    "ADD",
    "ALLOW",
    "ALTER",
    "AND",
    "ANY",
    "APPLY",
    "ASC",
    "AUTHORIZE",
    "BATCH",
    "BEGIN",
    "BY",
    "COLUMNFAMILY",
    "CREATE",
    "DELETE",
    "DESC",
    "DROP",
    "EACH_QUORUM",
    "FROM",
    "GRANT",
    "IN",
    "INDEX",
    "INET",
    "INFINITY",
    "INSERT",
    "INTO",
    "KEYSPACE",
    "KEYSPACES",
    "LIMIT",
    "LOCAL_ONE",
    "LOCAL_QUORUM",
    "MODIFY",
    "NAN",
    "NORECURSIVE",
    "OF",
    "ON",
    "ONE",
    "ORDER",
    "PASSWORD",
    "PRIMARY",
    "QUORUM",
    "RENAME",
    "REVOKE",
    "SCHEMA",
    "SELECT",
    "SET",
    "TABLE",
    "THREE",
    "TO",
    "TOKEN",
    "TRUNCATE",
    "TWO",
    "UNLOGGED",
    "UPDATE",
    "USE",
    "USING",
    "WHERE",
    "WITH",
];

lazy_static! {
    static ref RESERVED_KEYWORDS: HashSet<&'static str> = RESERVED.iter().copied().collect();
}

/// True if `text` is a reserved keyword, ignoring case
pub fn is_reserved_keyword(text: &str) -> bool {
    RESERVED_KEYWORDS.contains(text.to_ascii_uppercase().as_str())
}

/// All reserved keywords, upper-cased, in alphabetical order
pub fn reserved_keywords() -> impl Iterator<Item = &'static str> {
    RESERVED.iter().copied()
}
