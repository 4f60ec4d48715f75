//! todo.txt endpoints

use actix_web::{web, HttpResponse};
use hub_types::AddTodoRequest;

use super::post_only;
use crate::error::HubResult;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/todos").route(web::get().to(list_todos)))
        .service(
            web::resource("/todos/add")
                .route(web::post().to(add_todo))
                .default_service(web::route().to(post_only)),
        );
}

async fn list_todos(state: web::Data<AppState>) -> HubResult<HttpResponse> {
    let todos = state.todos.list()?;
    Ok(HttpResponse::Ok().json(todos))
}

async fn add_todo(
    state: web::Data<AppState>,
    body: web::Json<AddTodoRequest>,
) -> HubResult<HttpResponse> {
    state.todos.add(&body.text)?;
    Ok(HttpResponse::Created().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::{json_config, test_support};
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use hub_types::Todo;

    #[actix_web::test]
    async fn test_add_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(test_support::state(dir.path()))
                .app_data(json_config())
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/todos/add")
            .set_json(serde_json::json!({ "text": "call mom" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert!(test::read_body(resp).await.is_empty());

        let req = test::TestRequest::post()
            .uri("/todos/add")
            .set_json(serde_json::json!({ "text": "x (A) 2024-02-02 file taxes +finance" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/todos").to_request();
        let todos: Vec<Todo> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].text, "call mom");
        assert!(!todos[0].completed);
        assert!(todos[1].completed);
        assert_eq!(todos[1].projects, vec!["+finance"]);
    }

    #[actix_web::test]
    async fn test_error_statuses() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(test_support::state(dir.path()))
                .app_data(json_config())
                .configure(config),
        )
        .await;

        let wrong_method = test::TestRequest::get().uri("/todos/add").to_request();
        assert_eq!(
            test::call_service(&app, wrong_method).await.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );

        let bad_body = test::TestRequest::post()
            .uri("/todos/add")
            .set_payload("text=hello")
            .to_request();
        assert_eq!(test::call_service(&app, bad_body).await.status(), StatusCode::BAD_REQUEST);
    }
}
