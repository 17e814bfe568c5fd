//! Todo lifecycle against a live server.
//!
//! # Design
//! Starts the server on a random port over a scratch data file, then drives
//! every client operation over real HTTP using ureq. Checks that request
//! building and response parsing agree with the actual server, and that the
//! data file reflects what the API reported.

use std::sync::Arc;

use todo_core::{ApiError, HttpMethod, HttpResponse, TodoClient, TodoService, TodoStore};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: todo_core::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.url).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.url).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
        (HttpMethod::Patch, Some(body)) => {
            agent.patch(&req.url).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Patch, None) => agent.patch(&req.url).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse::new(status, body)
}

#[test]
fn todo_lifecycle_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("todos.json");
    let service = Arc::new(TodoService::open(data_file.clone()).unwrap());

    // Step 1: start the server on a random port.
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener, todo_server::app(service)).await
        })
        .unwrap();
    });

    let client = TodoClient::new(&format!("http://{addr}"));

    // Step 2: list — should be empty.
    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // Step 3: create two todos.
    let req = client.build_create_todo("Buy milk").unwrap();
    let milk = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(milk.id, 1);
    assert_eq!(milk.text, "Buy milk");
    assert!(!milk.completed);

    let req = client.build_create_todo("Walk dog").unwrap();
    let dog = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(dog.id, 2);

    // Step 4: blank text is a bad request.
    let req = client.build_create_todo("   ").unwrap();
    let err = client.parse_create_todo(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(ref m) if m == "text required"));

    // Step 5: complete the first.
    let done = client
        .parse_complete_todo(execute(client.build_complete_todo(milk.id)))
        .unwrap();
    assert!(done.completed);

    // Step 6: delete it, then delete again.
    client.parse_delete_todo(execute(client.build_delete_todo(milk.id))).unwrap();
    let err = client
        .parse_delete_todo(execute(client.build_delete_todo(milk.id)))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 7: completing a missing todo is NotFound.
    let err = client
        .parse_complete_todo(execute(client.build_complete_todo(milk.id)))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 8: only the second remains, and the freed id is not reused.
    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert_eq!(todos, vec![dog.clone()]);

    let req = client.build_create_todo("Pay bills").unwrap();
    let bills = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(bills.id, 3);

    // Step 9: the file on disk matches what the API reported.
    let on_disk = TodoStore::new(data_file).load_all().unwrap();
    assert_eq!(on_disk, vec![dog, bills]);
}
