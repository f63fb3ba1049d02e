/// How a field's projected value compares under ordering operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    /// `*`, every default column. Only valid in the SELECT list.
    All,
    Permission,
    Links,
    Owner,
    Group,
    FileSize,
    LastMod,
    CreatedAt,
    Name,
    Extension,
    Path,
    Type,
}

/// One row of the field table.
#[derive(Debug)]
pub struct FieldDef {
    pub field: FieldName,
    pub keyword: &'static str,
    pub aliases: &'static [&'static str],
    pub kind: ValueKind,
    /// Whether the field may appear on the left of a WHERE condition.
    pub filterable: bool,
    /// Column title used by the table printer.
    pub title: &'static str,
}

/// The single field table shared by the parser, evaluator and printers.
pub const FIELD_TABLE: &[FieldDef] = &[
    FieldDef {
        field: FieldName::All,
        keyword: "*",
        aliases: &[],
        kind: ValueKind::Text,
        filterable: false,
        title: "*",
    },
    FieldDef {
        field: FieldName::Permission,
        keyword: "permission",
        aliases: &[],
        kind: ValueKind::Text,
        filterable: true,
        title: "Perms",
    },
    FieldDef {
        field: FieldName::Links,
        keyword: "links",
        aliases: &[],
        kind: ValueKind::Integer,
        filterable: true,
        title: "Links",
    },
    FieldDef {
        field: FieldName::Owner,
        keyword: "owner",
        aliases: &[],
        kind: ValueKind::Text,
        filterable: true,
        title: "Owner",
    },
    FieldDef {
        field: FieldName::Group,
        keyword: "group",
        aliases: &[],
        kind: ValueKind::Text,
        filterable: true,
        title: "Group",
    },
    FieldDef {
        field: FieldName::FileSize,
        keyword: "filesize",
        aliases: &["size"],
        kind: ValueKind::Integer,
        filterable: true,
        title: "Size",
    },
    FieldDef {
        field: FieldName::LastMod,
        keyword: "lastmod",
        aliases: &[],
        kind: ValueKind::Date,
        filterable: true,
        title: "Last Mod",
    },
    FieldDef {
        field: FieldName::CreatedAt,
        keyword: "createdt",
        aliases: &[],
        kind: ValueKind::Date,
        filterable: true,
        title: "Created",
    },
    FieldDef {
        field: FieldName::Name,
        keyword: "name",
        aliases: &[],
        kind: ValueKind::Text,
        filterable: true,
        title: "Name",
    },
    FieldDef {
        field: FieldName::Extension,
        keyword: "extension",
        aliases: &[],
        kind: ValueKind::Text,
        filterable: true,
        title: "Ext.",
    },
    FieldDef {
        field: FieldName::Path,
        keyword: "path",
        aliases: &[],
        kind: ValueKind::Text,
        filterable: true,
        title: "Path",
    },
    FieldDef {
        field: FieldName::Type,
        keyword: "type",
        aliases: &[],
        kind: ValueKind::Text,
        filterable: true,
        title: "Type",
    },
];

/// Columns `*` expands to, in display order.
pub const DEFAULT_COLUMNS: &[FieldName] = &[
    FieldName::Path,
    FieldName::LastMod,
    FieldName::CreatedAt,
    FieldName::Owner,
    FieldName::Group,
    FieldName::Name,
    FieldName::Extension,
    FieldName::FileSize,
];

impl FieldName {
    /// Look up a field by keyword or alias. Case-sensitive.
    pub fn lookup(token: &str) -> Option<FieldName> {
        FIELD_TABLE
            .iter()
            .find(|def| def.keyword == token || def.aliases.iter().any(|a| *a == token))
            .map(|def| def.field)
    }

    pub fn def(self) -> &'static FieldDef {
        // FIELD_TABLE has exactly one row per variant, in declaration order.
        &FIELD_TABLE[self as usize]
    }

    #[inline]
    pub fn keyword(self) -> &'static str {
        self.def().keyword
    }

    #[inline]
    pub fn kind(self) -> ValueKind {
        self.def().kind
    }

    #[inline]
    pub fn is_filterable(self) -> bool {
        self.def().filterable
    }

    #[inline]
    pub fn title(self) -> &'static str {
        self.def().title
    }
}

/// Expand `*` into the default columns, keeping explicit fields in place.
pub fn expand_fields(fields: &[FieldName]) -> Vec<FieldName> {
    let mut out = Vec::with_capacity(fields.len() + DEFAULT_COLUMNS.len());
    for &f in fields {
        match f {
            FieldName::All => out.extend_from_slice(DEFAULT_COLUMNS),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_follow_variant_order() {
        for (i, def) in FIELD_TABLE.iter().enumerate() {
            assert_eq!(def.field as usize, i, "row for {:?}", def.field);
            assert_eq!(def.field.def().keyword, def.keyword);
        }
    }

    #[test]
    fn lookup_accepts_keywords_and_aliases_only() {
        let cases: &[(&str, Option<FieldName>)] = &[
            ("name", Some(FieldName::Name)),
            ("filesize", Some(FieldName::FileSize)),
            ("size", Some(FieldName::FileSize)),
            ("createdt", Some(FieldName::CreatedAt)),
            ("*", Some(FieldName::All)),
            ("NAME", None),
            ("bogus", None),
            ("", None),
        ];

        for (token, expected) in cases {
            assert_eq!(FieldName::lookup(token), *expected, "lookup({token:?})");
        }
    }

    #[test]
    fn star_expands_in_place() {
        let got = expand_fields(&[FieldName::Type, FieldName::All, FieldName::Links]);
        assert_eq!(got.len(), DEFAULT_COLUMNS.len() + 2);
        assert_eq!(got[0], FieldName::Type);
        assert_eq!(&got[1..=DEFAULT_COLUMNS.len()], DEFAULT_COLUMNS);
        assert_eq!(got.last(), Some(&FieldName::Links));
    }
}
