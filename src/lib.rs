//! Workspace root package; carries tooling configuration only.
