//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::ProductNotFound(product) => {
            StatusError::not_found().brief(format!("Product {product} not found"))
        }
        OrdersServiceError::OutOfStock { name } => {
            StatusError::bad_request().brief(format!("Product {name} is out of stock"))
        }
        OrdersServiceError::InsufficientStock { name, available } => StatusError::bad_request()
            .brief(format!("Insufficient stock for {name}. Available: {available}")),
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Not authorized to view this order")
        }
        OrdersServiceError::InvalidData(reason) => StatusError::bad_request().brief(reason),
        OrdersServiceError::InvalidReference => {
            StatusError::bad_request().brief("Order references an unknown record")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn stock_failures_name_the_product() {
        let error = into_status_error(OrdersServiceError::InsufficientStock {
            name: "Feather Wall Art".to_string(),
            available: 1,
        });

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, "Insufficient stock for Feather Wall Art. Available: 1");

        let error = into_status_error(OrdersServiceError::OutOfStock {
            name: "Hanging Planters Set".to_string(),
        });

        assert_eq!(error.brief, "Product Hanging Planters Set is out of stock");
    }
}
