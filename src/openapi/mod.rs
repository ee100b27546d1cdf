use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tienda API",
        version = "1.0.0",
        description = r#"
# Tienda Retail API

Back office and point of sale for small retail shops: inventory, checkout,
customers, a stock-movement ledger, cash register sessions, reports and a
simulated delivery fleet.

## Authentication

All endpoints under `/api/v1` require a JWT issued by `/auth/login`:

```
Authorization: Bearer <your-jwt-token>
```

## Pagination

List endpoints accept `page` and `per_page` query parameters
(default 20, max 100 per page).
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "inventory", description = "Inventory item management"),
        (name = "sales", description = "Point of sale checkout"),
        (name = "Health", description = "Health check endpoints")
    ),
    paths(
        crate::handlers::inventory::list_items,
        crate::handlers::inventory::create_item,
        crate::handlers::inventory::low_stock,
        crate::handlers::inventory::record_stock_entry,
        crate::handlers::sales::checkout,
    ),
    components(
        schemas(
            crate::entities::inventory_item::Model,
            crate::services::inventory::CreateItemInput,
            crate::services::inventory::UpdateItemInput,
            crate::services::inventory::StockEntryInput,
            crate::services::checkout::CheckoutInput,
            crate::services::checkout::CheckoutLine,
            crate::services::checkout::Receipt,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_builds() {
        let doc = ApiDocV1::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/inventory"));
        assert!(doc.paths.paths.contains_key("/api/v1/sales"));
    }
}
