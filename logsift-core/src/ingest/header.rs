use crate::record::FIELD_COUNT;

// Accepted spellings per column, compared after lowercasing and dropping
// everything that is not alphanumeric ("Client-IP" -> "clientip").
const COLUMN_ALIASES: [&[&str]; FIELD_COUNT] = [
    &["clientaddress", "clientip", "ip", "address", "host", "remoteaddr"],
    &["timestamp", "time", "datetime", "date"],
    &["resourcepath", "path", "url", "uri", "request"],
    &["statuscode", "status", "responsestatus"],
    &["clientagent", "useragent", "agent"],
];

/// True when the fields read like a column header rather than a record.
pub(crate) fn is_header(fields: &[&str]) -> bool {
    fields.len() == FIELD_COUNT
        && fields
            .iter()
            .zip(COLUMN_ALIASES.iter())
            .all(|(field, aliases)| aliases.contains(&normalize(field).as_str()))
}

fn normalize(field: &str) -> String {
    field
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
