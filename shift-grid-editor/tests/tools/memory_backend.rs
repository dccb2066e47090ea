// メモリ上で動く偽のAPIサーバー
// 送られてきたリクエストを記録し、アクションごとに用意した応答を返す

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde_json::{json, Value};
use shift_grid_editor::{ApiError, Transport};

pub const PASSWORD: &str = "secret";

#[derive(Default)]
struct Inner {
    staff: Vec<String>,
    shifts: Vec<Value>,
    /// (date, staff, shift)
    assignments: Vec<(String, String, String)>,
    requests: Vec<Value>,
    /// アクション名 -> 1回分の差し替え応答
    overrides: HashMap<String, VecDeque<Result<String, ApiError>>>,
}

#[derive(Default)]
pub struct MemoryBackend {
    inner: Mutex<Inner>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_staff(self, names: &[&str]) -> Self {
        self.inner.lock().unwrap().staff = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_shift_type(self, label: &str, color: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .shifts
            .push(json!({ "label": label, "color": color }));
        self
    }

    pub fn with_assignment(self, date: &str, staff: &str, shift: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .assignments
            .push((date.to_string(), staff.to_string(), shift.to_string()));
        self
    }

    /// 次の1回だけ、このアクションに生の本文を返す
    pub fn respond_raw(&self, action: &str, body: &str) {
        self.push_override(action, Ok(body.to_string()));
    }

    /// 次の1回だけ、このアクションを通信失敗にする
    pub fn fail_transport(&self, action: &str, message: &str) {
        self.push_override(action, Err(ApiError::Transport(message.to_string())));
    }

    fn push_override(&self, action: &str, response: Result<String, ApiError>) {
        self.inner
            .lock()
            .unwrap()
            .overrides
            .entry(action.to_string())
            .or_default()
            .push_back(response);
    }

    pub fn requests(&self) -> Vec<Value> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn actions(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r["action"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    pub fn staff(&self) -> Vec<String> {
        self.inner.lock().unwrap().staff.clone()
    }

    pub fn assignments(&self) -> Vec<(String, String, String)> {
        self.inner.lock().unwrap().assignments.clone()
    }

    fn handle(&self, body: &str) -> Result<String, ApiError> {
        let request: Value = serde_json::from_str(body).expect("request body is JSON");
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(request.clone());

        let action = request["action"].as_str().unwrap_or_default().to_string();
        if let Some(response) = inner.overrides.get_mut(&action).and_then(VecDeque::pop_front) {
            return response;
        }

        let response = match action.as_str() {
            "login" => {
                if request["password"] == PASSWORD {
                    ok(json!({}))
                } else {
                    error("パスワードが違います")
                }
            }
            "getConfig" => ok(json!({ "staff": inner.staff, "shifts": inner.shifts })),
            "getShifts" => {
                let prefix = format!(
                    "{}-{:02}-",
                    request["year"].as_i64().unwrap_or_default(),
                    request["month"].as_i64().unwrap_or_default()
                );
                let data: Vec<Value> = inner
                    .assignments
                    .iter()
                    .filter(|(date, _, _)| date.starts_with(&prefix))
                    .map(|(date, staff, shift)| json!({ "date": date, "staff": staff, "shift": shift }))
                    .collect();
                ok(json!({ "data": data }))
            }
            "saveShifts" => {
                let payload = request["payload"].as_array().cloned().unwrap_or_default();
                for item in payload {
                    let date = item["date"].as_str().unwrap_or_default().to_string();
                    let staff = item["staff"].as_str().unwrap_or_default().to_string();
                    let shift = item["shift"].as_str().unwrap_or_default().to_string();
                    inner.assignments.retain(|(d, s, _)| !(d == &date && s == &staff));
                    inner.assignments.push((date, staff, shift));
                }
                ok(json!({}))
            }
            "addStaff" => {
                let name = request["name"].as_str().unwrap_or_default().to_string();
                if inner.staff.contains(&name) {
                    error("既に登録されています")
                } else {
                    inner.staff.push(name);
                    ok(json!({}))
                }
            }
            "deleteStaff" => {
                let name = request["name"].as_str().unwrap_or_default();
                inner.staff.retain(|s| s != name);
                ok(json!({}))
            }
            "saveSetting" => {
                inner.shifts.push(json!({ "label": request["label"], "color": request["color"] }));
                ok(json!({}))
            }
            "deleteSetting" => {
                let label = request["label"].clone();
                inner.shifts.retain(|s| s["label"] != label);
                ok(json!({}))
            }
            other => error(&format!("unknown action: {}", other)),
        };
        Ok(response.to_string())
    }
}

fn ok(mut body: Value) -> Value {
    body["status"] = json!("success");
    body
}

fn error(message: &str) -> Value {
    json!({ "status": "error", "message": message })
}

impl Transport for MemoryBackend {
    async fn post(&self, body: String) -> Result<String, ApiError> {
        self.handle(&body)
    }
}
