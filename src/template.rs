//! Wildcard statement expansion over `FROM`/`JOIN` table references.
//!
//! Expansion is regex-driven pattern matching over raw SQL text, not SQL
//! parsing: it cannot tell a derived table from a real one, which is why
//! statements with CTEs or subqueries are rejected up front instead of being
//! rewritten incorrectly. The patterns cover the common
//! `from <table> [as] [alias]` and `join <table> [as] [alias]` shapes with
//! optional schema qualification.

use std::sync::LazyLock;

use regex::Regex;

use crate::parse::Query;

/// Patterns that disqualify a statement from expansion.
static NO_SUBSTITUTE: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)\bwith\s+").unwrap(),
        Regex::new(r"(?i)\bfrom\s*\(").unwrap(),
        Regex::new(r"(?i)\bjoin\s*\(").unwrap(),
        Regex::new(r"(?i)\(\s*select\b").unwrap(),
    ]
});

/// Table reference patterns, applied FROM-first then JOIN. Capture group 1
/// is the (optionally schema-qualified) table name, group 5 the candidate
/// alias.
static TABLE_NAMES: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)\bfrom\s+(\w+(\.\w+)?)(\s+as)?(\s+(\w+))?").unwrap(),
        Regex::new(r"(?i)\bjoin\s+(\w+(\.\w+)?)(\s+as)?(\s+(\w+))?").unwrap(),
    ]
});

/// Words that can follow a table reference but can never be its alias.
const SQL_KEYWORDS: [&str; 15] = [
    "inner", "left", "right", "cross", "natural", "join", "using", "on", "where", "having",
    "group", "order", "limit", "into", "for",
];

/// Reasons a wildcard statement cannot be expanded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// The statement contains a CTE or subquery marker.
    #[error(
        "Building template failed. Query has subqueries or CTE's and can't be used for substitution. Query:\n{query}"
    )]
    Subquery {
        /// Text of the rejected statement.
        query: String,
    },
    /// The statement has no `*` placeholder to substitute.
    #[error(
        "Building template failed. Query does not contain table placeholder `*`. Query:\n{query}"
    )]
    MissingPlaceholder {
        /// Text of the rejected statement.
        query: String,
    },
    /// No `FROM`/`JOIN` table reference was found to substitute.
    #[error("Building template failed. No table found in this query. Query:\n{query}")]
    NoTables {
        /// Text of the rejected statement.
        query: String,
    },
}

/// Expand a wildcard statement into one statement per referenced table.
///
/// The single `*` placeholder is replaced with `<alias-or-table>.*` once per
/// distinct `FROM`/`JOIN` match; each produced statement carries the matched
/// table name (schema-qualified as written). All `FROM` matches come before
/// all `JOIN` matches, each group in order of appearance.
///
/// # Errors
///
/// [`TemplateError::Subquery`] when a guard pattern matches,
/// [`TemplateError::MissingPlaceholder`] when the text has no `*`, and
/// [`TemplateError::NoTables`] when no table reference is found.
pub fn expand(query: &Query) -> Result<Vec<Query>, TemplateError> {
    let text = query.text.as_str();

    for pattern in NO_SUBSTITUTE.iter() {
        if pattern.is_match(text) {
            return Err(TemplateError::Subquery { query: text.into() });
        }
    }

    let star = text
        .find('*')
        .ok_or_else(|| TemplateError::MissingPlaceholder { query: text.into() })?;
    let left = &text[..star];
    let right = &text[star + 1..];

    let mut result = Vec::new();

    for pattern in TABLE_NAMES.iter() {
        for captures in pattern.captures_iter(text) {
            let table = &captures[1];
            let alias = captures.get(5).map(|group| group.as_str());

            let identifier = match alias {
                Some(alias) if !is_keyword(alias) => alias,
                _ => table,
            };

            result.push(Query::new(
                Some(table.to_string()),
                format!("{left}{identifier}.*{right}"),
            ));
        }
    }

    if result.is_empty() {
        return Err(TemplateError::NoTables { query: text.into() });
    }

    Ok(result)
}

fn is_keyword(word: &str) -> bool {
    SQL_KEYWORDS
        .iter()
        .any(|keyword| word.eq_ignore_ascii_case(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(text: &str) -> Query {
        Query::new(None, text)
    }

    #[test]
    fn test_empty_query() {
        assert!(expand(&template("")).is_err());
    }

    #[test]
    fn test_no_tables() {
        assert_eq!(
            expand(&template("select *")),
            Err(TemplateError::NoTables {
                query: "select *".into()
            })
        );
    }

    #[test]
    fn test_missing_placeholder() {
        assert_eq!(
            expand(&template("select a from table_a")),
            Err(TemplateError::MissingPlaceholder {
                query: "select a from table_a".into()
            })
        );
    }

    #[test]
    fn test_with_clause_rejected() {
        let result = expand(&template("with raw as ( select 1 ) select * from raw"));
        assert!(matches!(result, Err(TemplateError::Subquery { .. })));
    }

    #[test]
    fn test_subquery_rejected() {
        let result = expand(&template("select * from raw where b in ( select 1 )"));
        assert!(matches!(result, Err(TemplateError::Subquery { .. })));
    }

    #[test]
    fn test_one_table() {
        let queries = expand(&template("select * from table_a")).unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].table_name.as_deref(), Some("table_a"));
        assert_eq!(queries[0].text, "select table_a.* from table_a");
    }

    #[test]
    fn test_one_table_with_schema() {
        let queries = expand(&template("select * from me.table_a")).unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].table_name.as_deref(), Some("me.table_a"));
        assert_eq!(queries[0].text, "select me.table_a.* from me.table_a");
    }

    #[test]
    fn test_one_table_with_alias() {
        let queries = expand(&template("select * from table_a a")).unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].table_name.as_deref(), Some("table_a"));
        assert_eq!(queries[0].text, "select a.* from table_a a");
    }

    #[test]
    fn test_one_table_with_schema_and_alias() {
        let queries = expand(&template("select * from me.table_a a")).unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].table_name.as_deref(), Some("me.table_a"));
        assert_eq!(queries[0].text, "select a.* from me.table_a a");
    }

    #[test]
    fn test_one_table_with_as_alias() {
        let queries = expand(&template("select * from table_a as a")).unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].table_name.as_deref(), Some("table_a"));
        assert_eq!(queries[0].text, "select a.* from table_a as a");
    }

    #[test]
    fn test_one_table_with_schema_and_as_alias() {
        let queries = expand(&template("select * from me.table_a as a")).unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].table_name.as_deref(), Some("me.table_a"));
        assert_eq!(queries[0].text, "select a.* from me.table_a as a");
    }

    #[test]
    fn test_keyword_is_not_an_alias() {
        let queries = expand(&template("select * from table_a where id = 3")).unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].table_name.as_deref(), Some("table_a"));
        assert_eq!(queries[0].text, "select table_a.* from table_a where id = 3");
    }

    #[test]
    fn test_three_tables() {
        let queries = expand(&template(
            "select * from me.table_a inner join me.table_b b using ( id ) \
             left outer join me.table_c as c on ( b.id = c.id )",
        ))
        .unwrap();

        assert_eq!(queries.len(), 3);
        assert_eq!(queries[0].table_name.as_deref(), Some("me.table_a"));
        assert_eq!(
            queries[0].text,
            "select me.table_a.* from me.table_a inner join me.table_b b using ( id ) \
             left outer join me.table_c as c on ( b.id = c.id )"
        );
        assert_eq!(queries[1].table_name.as_deref(), Some("me.table_b"));
        assert_eq!(
            queries[1].text,
            "select b.* from me.table_a inner join me.table_b b using ( id ) \
             left outer join me.table_c as c on ( b.id = c.id )"
        );
        assert_eq!(queries[2].table_name.as_deref(), Some("me.table_c"));
        assert_eq!(
            queries[2].text,
            "select c.* from me.table_a inner join me.table_b b using ( id ) \
             left outer join me.table_c as c on ( b.id = c.id )"
        );
    }

    #[test]
    fn test_inner_join_pair() {
        let queries = expand(&template("select * from a inner join b using (id)")).unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].table_name.as_deref(), Some("a"));
        assert_eq!(queries[0].text, "select a.* from a inner join b using (id)");
        assert_eq!(queries[1].table_name.as_deref(), Some("b"));
        assert_eq!(queries[1].text, "select b.* from a inner join b using (id)");
    }
}
