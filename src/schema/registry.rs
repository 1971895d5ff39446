//! Type registry for loading named type definitions from disk
//!
//! - One file per type: `<dir>/<name>.json`, body is a serialized `Type`
//! - Registered types are immutable; re-registering a name fails
//! - Types deeper than the configured limit are refused

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::errors::{SchemaError, SchemaResult};
use super::types::Type;
use crate::config::ShapeConfig;
use crate::observability::{log_event_with_fields, Event};

/// Registry of named, shared type definitions.
#[derive(Debug)]
pub struct TypeRegistry {
    /// Directory containing type files
    type_dir: PathBuf,
    /// Maximum accepted `Type::depth()`
    max_depth: usize,
    types: BTreeMap<String, Arc<Type>>,
}

impl TypeRegistry {
    /// Creates an empty registry reading from `type_dir`.
    pub fn new(type_dir: impl Into<PathBuf>) -> Self {
        Self {
            type_dir: type_dir.into(),
            max_depth: ShapeConfig::default().max_schema_depth,
            types: BTreeMap::new(),
        }
    }

    /// Creates a registry from configuration and loads every type file.
    ///
    /// Without a configured `schema_dir` the registry starts empty.
    pub fn from_config(config: &ShapeConfig) -> SchemaResult<Self> {
        let mut registry = match &config.schema_dir {
            Some(dir) => Self::new(dir),
            None => Self::new(PathBuf::new()),
        }
        .with_max_depth(config.max_schema_depth);

        if config.schema_dir.is_some() {
            registry.load_all()?;
        }
        Ok(registry)
    }

    /// Overrides the depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the type directory path.
    pub fn type_dir(&self) -> &Path {
        &self.type_dir
    }

    /// Loads all `*.json` type files from the type directory.
    ///
    /// A missing directory is treated as empty. Files are loaded in name
    /// order; the first bad file aborts the load.
    pub fn load_all(&mut self) -> SchemaResult<usize> {
        if !self.type_dir.exists() {
            return Ok(0);
        }

        let origin = self.type_dir.display().to_string();
        let entries = fs::read_dir(&self.type_dir).map_err(|e| SchemaError::io(&origin, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| SchemaError::io(&origin, e))?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            self.load_type_file(path)?;
        }

        let loaded = paths.len().to_string();
        log_event_with_fields(
            Event::RegistryLoaded,
            &[("dir", origin.as_str()), ("types", loaded.as_str())],
        );
        Ok(paths.len())
    }

    fn load_type_file(&mut self, path: &Path) -> SchemaResult<()> {
        let origin = path.display().to_string();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| SchemaError::malformed_type(&origin, "file name is not valid UTF-8"))?
            .to_string();

        let content = fs::read_to_string(path).map_err(|e| SchemaError::io(&origin, e))?;
        let ty: Type = serde_json::from_str(&content).map_err(|e| SchemaError::parse(&origin, e))?;

        self.register(name, ty).map(|_| ())
    }

    /// Registers a type under `name` and returns the shared handle.
    pub fn register(&mut self, name: impl Into<String>, ty: Type) -> SchemaResult<Arc<Type>> {
        let name = name.into();

        if self.types.contains_key(&name) {
            return Err(SchemaError::duplicate_type(name));
        }

        let depth = ty.depth();
        if depth > self.max_depth {
            return Err(SchemaError::too_deep(name, depth, self.max_depth));
        }

        let ty = Arc::new(ty);
        log_event_with_fields(
            Event::TypeRegistered,
            &[("kind", ty.kind().as_str()), ("name", name.as_str())],
        );
        self.types.insert(name, Arc::clone(&ty));
        Ok(ty)
    }

    /// Gets a type by name.
    pub fn get(&self, name: &str) -> Option<Arc<Type>> {
        self.types.get(name).cloned()
    }

    /// Checks if a type is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Returns the number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Writes a type definition to `<dir>/<name>.json` without registering it.
    ///
    /// `name` must be a plain file stem: no path separators, no `..`.
    pub fn save_type(&self, name: &str, ty: &Type) -> SchemaResult<PathBuf> {
        if !is_plain_stem(name) {
            return Err(SchemaError::invalid_name(name));
        }

        let path = self.type_dir.join(format!("{}.json", name));
        let origin = path.display().to_string();

        if path.exists() {
            return Err(SchemaError::duplicate_type(name));
        }

        fs::create_dir_all(&self.type_dir).map_err(|e| SchemaError::write_failed(&origin, e))?;
        let content =
            serde_json::to_string_pretty(ty).map_err(|e| SchemaError::write_failed(&origin, e))?;
        fs::write(&path, content).map_err(|e| SchemaError::write_failed(&origin, e))?;

        Ok(path)
    }
}

fn is_plain_stem(name: &str) -> bool {
    !name.is_empty() && !name.contains("..") && !name.chars().any(std::path::is_separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaErrorCode;
    use tempfile::TempDir;

    fn pair() -> Type {
        Type::table([("k", Type::string(0)), ("v", Type::number())])
    }

    #[test]
    fn test_register_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = TypeRegistry::new(temp_dir.path());

        let handle = registry.register("pair", pair()).unwrap();

        let fetched = registry.get("pair").unwrap();
        assert!(Arc::ptr_eq(&handle, &fetched));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registered_types_are_immutable() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = TypeRegistry::new(temp_dir.path());

        registry.register("pair", pair()).unwrap();
        let err = registry.register("pair", Type::number()).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::DuplicateType);
        assert_eq!(registry.get("pair").unwrap().as_ref(), &pair());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let registry = TypeRegistry::new(temp_dir.path());
        registry.save_type("pair", &pair()).unwrap();
        registry
            .save_type("numbers", &Type::list(Type::number(), 3))
            .unwrap();

        let mut reloaded = TypeRegistry::new(temp_dir.path());
        assert_eq!(reloaded.load_all().unwrap(), 2);
        assert_eq!(reloaded.names().collect::<Vec<_>>(), vec!["numbers", "pair"]);
        assert_eq!(reloaded.get("pair").unwrap().as_ref(), &pair());
    }

    #[test]
    fn test_load_skips_non_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("README.txt"), "not a type").unwrap();

        let mut registry = TypeRegistry::new(temp_dir.path());
        assert_eq!(registry.load_all().unwrap(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_malformed_file_fails_load() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("bad.json"), r#"{"kind": "object"}"#).unwrap();

        let mut registry = TypeRegistry::new(temp_dir.path());
        let err = registry.load_all().unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::MalformedType);
        assert!(err.message().contains("bad.json"));
    }

    #[test]
    fn test_depth_limit() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = TypeRegistry::new(temp_dir.path()).with_max_depth(2);

        assert!(registry.register("flat", Type::list(Type::number(), 0)).is_ok());
        let err = registry
            .register("deep", Type::list(Type::list(Type::number(), 0), 0))
            .unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::SchemaTooDeep);
        assert!(!registry.contains("deep"));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = TypeRegistry::new(temp_dir.path().join("absent"));
        assert_eq!(registry.load_all().unwrap(), 0);
    }

    #[test]
    fn test_save_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let registry = TypeRegistry::new(temp_dir.path());
        registry.save_type("pair", &pair()).unwrap();
        assert!(registry.save_type("pair", &Type::any()).is_err());
    }

    #[test]
    fn test_save_rejects_names_outside_type_dir() {
        let temp_dir = TempDir::new().unwrap();
        let registry = TypeRegistry::new(temp_dir.path().join("types"));

        for name in ["../escape", "nested/pair", "..", ""] {
            let err = registry.save_type(name, &pair()).unwrap_err();
            assert_eq!(err.code(), SchemaErrorCode::InvalidTypeName, "name {:?}", name);
        }
        assert!(!temp_dir.path().join("escape.json").exists());
        assert!(!temp_dir.path().join("types").exists());
    }

    #[test]
    fn test_save_reports_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("types");
        fs::write(&blocker, "not a directory").unwrap();

        let registry = TypeRegistry::new(&blocker);
        let err = registry.save_type("pair", &pair()).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::TypeWriteFailed);
    }
}
