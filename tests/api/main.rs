mod admin_leads;
mod health_check;
mod helpers;
mod postgres_store;
mod store_down;
