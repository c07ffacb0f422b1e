//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post, put},
};

use crate::{
    AppState, endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, edit_expense_endpoint,
        get_expenses_page,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::EXPENSES_API, post(create_expense_endpoint))
        .route(
            endpoints::EXPENSE,
            put(edit_expense_endpoint).delete(delete_expense_endpoint),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the expenses page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::EXPENSES_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use scraper::{Html, Selector};

    use crate::{AppState, build_router, endpoints};

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection, "Etc/UTC").expect("Could not create app state");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    fn row_count(page: &str) -> usize {
        let html = Html::parse_document(page);
        let selector = Selector::parse("#expenses tbody tr").unwrap();
        html.select(&selector).count()
    }

    fn total(page: &str) -> String {
        let html = Html::parse_document(page);
        let selector = Selector::parse("#total p").unwrap();
        html.select(&selector)
            .next()
            .expect("No total found")
            .text()
            .collect()
    }

    #[tokio::test]
    async fn add_edit_delete_round_trip() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES_API)
            .form(&[
                ("amount", "12.50"),
                ("category", "Food"),
                ("note", "lunch"),
                ("filter", "month"),
            ])
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header("hx-redirect", "/expenses?filter=month");

        server
            .post(endpoints::EXPENSES_API)
            .form(&[("amount", "7"), ("category", "Books"), ("note", "")])
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let page = server.get("/expenses?filter=month").await.text();
        assert_eq!(row_count(&page), 2);
        assert_eq!(total(&page), "$19.50");

        server
            .put("/api/expenses/1?filter=all")
            .form(&[("amount", "20"), ("category", "Food"), ("note", "dinner")])
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let page = server.get(endpoints::EXPENSES_VIEW).await.text();
        assert_eq!(total(&page), "$27.00");

        server
            .delete("/api/expenses/2?filter=all")
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let page = server.get(endpoints::EXPENSES_VIEW).await.text();
        assert_eq!(row_count(&page), 1);
        assert_eq!(total(&page), "$20.00");
    }

    #[tokio::test]
    async fn invalid_expense_is_not_added() {
        let server = get_test_server();

        server
            .post(endpoints::EXPENSES_API)
            .form(&[("amount", "abc"), ("category", "Food"), ("note", "")])
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let page = server.get(endpoints::EXPENSES_VIEW).await.text();
        assert_eq!(row_count(&page), 0);
        assert_eq!(total(&page), "$0.00");
    }

    #[tokio::test]
    async fn edit_with_non_numeric_amount_is_rejected() {
        let server = get_test_server();
        server
            .post(endpoints::EXPENSES_API)
            .form(&[("amount", "5"), ("category", "Food"), ("note", "")])
            .await;

        let response = server
            .put("/api/expenses/1")
            .form(&[("amount", "abc"), ("category", "Food"), ("note", "")])
            .await;
        assert!(
            response.status_code().is_client_error(),
            "want a client error, got {}",
            response.status_code()
        );

        let page = server.get(endpoints::EXPENSES_VIEW).await.text();
        assert_eq!(total(&page), "$5.00");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        server
            .get("/does-not-exist")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn error_page_is_internal_server_error() {
        let server = get_test_server();

        server
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
