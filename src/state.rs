use crate::repository::ProductRepository;
use crate::services::ProductService;

/// Shared application state, cloned into each handler.
#[derive(Clone)]
pub struct AppState<R: ProductRepository> {
    pub product_service: ProductService<R>,
}

impl<R: ProductRepository> AppState<R> {
    pub fn new(repo: R) -> Self {
        Self {
            product_service: ProductService::new(repo),
        }
    }
}
