//! SQL migrations for the profile store, applied in order at startup.
//!
//! Applied migrations are tracked in a `_migrations` table; each entry
//! runs at most once.

/// All migrations, in application order: (name, sql)
pub fn get_migrations() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "001_create_profiles",
            r"
            CREATE TABLE IF NOT EXISTS profiles (
                user_id TEXT PRIMARY KEY,
                exploration REAL NOT NULL DEFAULT 0.5,
                mentorship REAL NOT NULL DEFAULT 0.5,
                community REAL NOT NULL DEFAULT 0.5,
                planning REAL NOT NULL DEFAULT 0.5,
                engagement TEXT NOT NULL DEFAULT 'medium',
                scenarios_viewed INTEGER NOT NULL DEFAULT 0,
                updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
            )
            ",
        ),
        (
            "002_profiles_updated_at_index",
            r"
            CREATE INDEX IF NOT EXISTS idx_profiles_updated_at
                ON profiles (updated_at)
            ",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_names_are_unique_and_ordered() {
        let migrations = get_migrations();
        let mut names: Vec<&str> = migrations.iter().map(|(n, _)| *n).collect();
        let original = names.clone();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), migrations.len(), "duplicate migration name");
        assert_eq!(original, names, "migrations must be listed in order");
    }
}
