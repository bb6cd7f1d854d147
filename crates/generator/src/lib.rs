//! Artifact generation for api-forge
//!
//! This crate renders a reconciled [`Catalog`] into:
//! - `api-list.md` and `api-list.tsv` (API list)
//! - `kongData.sql` and `aclData.sql` (gateway and ACL seed data)
//! - `<service>/<operationId>_ok.yaml` (test fixture skeletons)
//!
//! Rendering only reads the catalog. Identifiers are never assigned here.

mod templates;
mod view;

pub use templates::{PLACEHOLDER, ROUTE_PARAM_REGEX};
pub use view::{status_marker, MOCK_MARKER, PRODUCTION_MARKER, TSV_HEADER};

use api_forge_common::{output, Catalog, ForgeError, Result};
use std::path::{Path, PathBuf};
use tera::Tera;
use view::{service_views, tsv_rows, OperationView, ServiceView};

pub const LIST_MARKDOWN_FILE: &str = "api-list.md";
pub const LIST_TSV_FILE: &str = "api-list.tsv";
pub const KONG_SQL_FILE: &str = "kongData.sql";
pub const ACL_SQL_FILE: &str = "aclData.sql";

/// Actor written into the trace columns of ACL rows
pub const TRACE_ACTOR: &str = "SYS_SETUP";

/// A rendered fixture and its path relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub relative_path: PathBuf,
    pub content: String,
}

/// Artifact generator
///
/// Transforms a reconciled catalog into list, SQL, and fixture files.
pub struct ArtifactGenerator<'a> {
    catalog: &'a Catalog,
    tera: Tera,
}

impl<'a> ArtifactGenerator<'a> {
    /// Create a new generator over a reconciled catalog
    pub fn new(catalog: &'a Catalog) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self { catalog, tera })
    }

    /// Generate every artifact to a directory
    pub fn generate_all(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = self.generate_list(output_dir)?;
        written.extend(self.generate_sql(output_dir)?);
        written.extend(self.generate_fixtures(output_dir)?);
        Ok(written)
    }

    /// Generate `api-list.md` and `api-list.tsv`
    pub fn generate_list(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let markdown_path = output_dir.join(LIST_MARKDOWN_FILE);
        output::write_text(&markdown_path, &self.render_list_markdown()?)?;

        let tsv_path = output_dir.join(LIST_TSV_FILE);
        output::write_tsv(&tsv_path, &self.list_rows()?)?;

        Ok(vec![markdown_path, tsv_path])
    }

    /// Generate `kongData.sql` and `aclData.sql`
    pub fn generate_sql(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let kong_path = output_dir.join(KONG_SQL_FILE);
        output::write_text(&kong_path, &self.render_kong_sql()?)?;

        let acl_path = output_dir.join(ACL_SQL_FILE);
        output::write_text(&acl_path, &self.render_acl_sql()?)?;

        Ok(vec![kong_path, acl_path])
    }

    /// Generate one fixture skeleton per operation
    pub fn generate_fixtures(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let fixtures = self.render_fixtures()?;
        let mut written = Vec::with_capacity(fixtures.len());

        for fixture in fixtures {
            let path = output_dir.join(&fixture.relative_path);
            output::write_text(&path, &fixture.content)?;
            written.push(path);
        }

        Ok(written)
    }

    /// Render the markdown API list
    pub fn render_list_markdown(&self) -> Result<String> {
        let services = service_views(self.catalog)?;
        let context = self.create_context(&services);
        self.render("api-list.md", &context)
    }

    /// Rows of the TSV API list, header first
    pub fn list_rows(&self) -> Result<Vec<Vec<String>>> {
        let services = service_views(self.catalog)?;
        Ok(tsv_rows(&services))
    }

    /// Render the gateway service/route seed script
    pub fn render_kong_sql(&self) -> Result<String> {
        let services = service_views(self.catalog)?;
        let context = self.create_context(&services);
        self.render("kongData.sql", &context)
    }

    /// Render the ACL resource seed script
    pub fn render_acl_sql(&self) -> Result<String> {
        let services = service_views(self.catalog)?;
        let context = self.create_context(&services);
        self.render("aclData.sql", &context)
    }

    /// Render every fixture skeleton without touching the filesystem
    pub fn render_fixtures(&self) -> Result<Vec<Fixture>> {
        let mut fixtures = Vec::new();

        for service in service_views(self.catalog)? {
            let service_dir = Path::new(service.name);
            for op in &service.operations {
                fixtures.push(Fixture {
                    relative_path: service_dir.join(format!("{}_ok.yaml", op.operation_id)),
                    content: self.render_fixture(op)?,
                });
            }
        }

        Ok(fixtures)
    }

    fn render_fixture(&self, op: &OperationView<'_>) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("op", op);
        self.render("fixture.yaml", &context)
    }

    fn render(&self, template: &str, context: &tera::Context) -> Result<String> {
        self.tera
            .render(template, context)
            .map_err(|e| ForgeError::Generation(format!("Template error in {}: {:?}", template, e)))
    }

    /// Create template context from the service views
    fn create_context(&self, services: &[ServiceView<'_>]) -> tera::Context {
        let mut context = tera::Context::new();
        context.insert("services", services);
        context.insert("work_space_id", &self.catalog.manifest().work_space_id);
        context.insert("trace_actor", TRACE_ACTOR);
        context
    }
}

/// Generate every artifact (convenience function)
pub fn generate_all(catalog: &Catalog, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let generator = ArtifactGenerator::new(catalog)?;
    generator.generate_all(output_dir)
}
