mod leads;

// re-exports
pub use leads::list_leads;
