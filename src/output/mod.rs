pub mod schema;

pub use schema::{
    CatalogListing, CheckReport, FrameworkListing, RenderReport, RenderedService,
    ServiceSourceReport,
};
