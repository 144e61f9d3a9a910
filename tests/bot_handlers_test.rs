//! Command and pager-button handlers end to end against a mocked Bot API.

use async_trait::async_trait;
use geobot::bot::handlers::{handle_callback, handle_command};
use geobot::bot::Command;
use geobot::models::location::{City, Country, State};
use geobot::services::location::{LocationApi, LocationError};
use geobot::services::router::CommandRouter;
use serde_json::{json, Value};
use std::sync::Arc;
use teloxide::types::{CallbackQuery, Message};
use teloxide::Bot;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const CHAT_ID: i64 = 5;
const MESSAGE_ID: i32 = 99;

struct Catalogue {
    countries: Vec<Country>,
}

#[async_trait]
impl LocationApi for Catalogue {
    async fn list_countries(&self) -> Result<Vec<Country>, LocationError> {
        Ok(self.countries.clone())
    }

    async fn list_states(&self, _country_code: &str) -> Result<Vec<State>, LocationError> {
        Ok(Vec::new())
    }

    async fn list_cities(
        &self,
        _country_code: &str,
        _state_code: &str,
    ) -> Result<Vec<City>, LocationError> {
        Ok(Vec::new())
    }
}

fn router() -> Arc<CommandRouter> {
    let countries = (0..120)
        .map(|i| Country {
            name: format!("Country {:03}", i),
            iso2: format!("C{}", i),
        })
        .collect();
    Arc::new(CommandRouter::new(Arc::new(Catalogue { countries })))
}

fn message_json(text: &str) -> Value {
    json!({
        "message_id": MESSAGE_ID,
        "date": 1700000000,
        "chat": {"id": CHAT_ID, "type": "private", "first_name": "Test"},
        "from": {"id": 123456, "is_bot": true, "first_name": "geobot"},
        "text": text
    })
}

fn callback_query(data: &str) -> CallbackQuery {
    serde_json::from_value(json!({
        "id": "abc",
        "from": {"id": 777, "is_bot": false, "first_name": "Ana"},
        "message": message_json("Countries (Page 2):\nCountry 050 (C50)"),
        "chat_instance": "42",
        "data": data
    }))
    .unwrap()
}

async fn telegram() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"(?i)^/bot[^/]+/answercallbackquery$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": true})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"(?i)^/bot[^/]+/(editmessagetext|sendmessage)$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true, "result": message_json("ok")})),
        )
        .mount(&server)
        .await;
    server
}

fn bot_for(server: &MockServer) -> Bot {
    Bot::new("123456:TEST").set_api_url(server.uri().parse().unwrap())
}

fn method_name(request: &Request) -> String {
    request
        .url
        .path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

#[tokio::test]
async fn pager_press_answers_then_edits_in_place() {
    let server = telegram().await;

    handle_callback(bot_for(&server), callback_query("next_3"), router())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let methods: Vec<String> = requests.iter().map(method_name).collect();
    assert_eq!(methods, vec!["answercallbackquery", "editmessagetext"]);

    assert_eq!(body(&requests[0])["callback_query_id"], "abc");

    let edit = body(&requests[1]);
    assert_eq!(edit["chat_id"], CHAT_ID);
    assert_eq!(edit["message_id"], MESSAGE_ID);
    assert!(edit["text"]
        .as_str()
        .unwrap()
        .starts_with("Countries (Page 3):\nCountry 100 (C100)\n"));
    assert_eq!(
        edit["reply_markup"],
        json!({"inline_keyboard": [[{"text": "Previous", "callback_data": "prev_2"}]]})
    );
}

#[tokio::test]
async fn malformed_pager_data_is_answered_and_ignored() {
    for data in ["jump_2", "next_0", "next_", "prev_x"] {
        let server = telegram().await;

        handle_callback(bot_for(&server), callback_query(data), router())
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let methods: Vec<String> = requests.iter().map(method_name).collect();
        assert_eq!(methods, vec!["answercallbackquery"], "payload {}", data);
    }
}

#[tokio::test]
async fn command_sends_new_message_with_pager() {
    let server = telegram().await;
    let msg: Message = serde_json::from_value(message_json("/countries 2")).unwrap();

    handle_command(
        bot_for(&server),
        msg,
        Command::Countries("2".to_string()),
        router(),
    )
    .await
    .unwrap();

    let requests = server.received_requests().await.unwrap();
    let methods: Vec<String> = requests.iter().map(method_name).collect();
    assert_eq!(methods, vec!["sendmessage"]);

    let sent = body(&requests[0]);
    assert_eq!(sent["chat_id"], CHAT_ID);
    assert!(sent["text"]
        .as_str()
        .unwrap()
        .starts_with("Countries (Page 2):\nCountry 050 (C50)\n"));
    assert_eq!(
        sent["reply_markup"],
        json!({"inline_keyboard": [
            [{"text": "Previous", "callback_data": "prev_1"}],
            [{"text": "Next", "callback_data": "next_3"}]
        ]})
    );
}

#[tokio::test]
async fn help_lists_commands() {
    let server = telegram().await;
    let msg: Message = serde_json::from_value(message_json("/help")).unwrap();

    handle_command(bot_for(&server), msg, Command::Help, router())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let text = body(&requests[0])["text"].as_str().unwrap().to_string();
    assert!(text.contains("/countries"));
    assert!(text.contains("/cities"));
}
