use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Habit {
    id: String,
    name: String,
    color: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToggleResponse {
    habit_id: String,
    date: String,
    completed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HabitStatus {
    habit_id: String,
    completed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarDay {
    date: String,
    is_current_month: bool,
    completed_count: usize,
    progress: Option<String>,
    habits: Vec<HabitStatus>,
}

#[derive(Debug, Deserialize)]
struct MonthView {
    year: i32,
    month: u32,
    title: String,
    habits: Vec<Habit>,
    days: Vec<CalendarDay>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_dir() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("habit_tracker_http_{}_{}", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/habits")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_dir = unique_data_dir();
    let child = Command::new(env!("CARGO_BIN_EXE_habit_tracker"))
        .env("PORT", port.to_string())
        .env("HABIT_DATA_DIR", data_dir)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn create_habit(client: &Client, base_url: &str, name: &str) -> Habit {
    let response = client
        .post(format!("{base_url}/api/habits"))
        .json(&serde_json::json!({ "name": name, "color": "#3B82F6" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    response.json().await.unwrap()
}

async fn toggle(client: &Client, base_url: &str, habit_id: &str, date: &str) -> ToggleResponse {
    let response = client
        .post(format!("{base_url}/api/progress/toggle"))
        .json(&serde_json::json!({ "habitId": habit_id, "date": date }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

async fn calendar(client: &Client, base_url: &str, year: i32, month: i32) -> MonthView {
    client
        .get(format!("{base_url}/api/calendar?year={year}&month={month}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_toggle_updates_calendar_counts() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habit = create_habit(&client, &server.base_url, "  Read  ").await;
    assert_eq!(habit.name, "Read");
    assert_eq!(habit.color, "#3B82F6");

    let toggled = toggle(&client, &server.base_url, &habit.id, "2023-02-14").await;
    assert_eq!(toggled.habit_id, habit.id);
    assert_eq!(toggled.date, "2023-02-14");
    assert!(toggled.completed);

    let view = calendar(&client, &server.base_url, 2023, 1).await;
    assert_eq!((view.year, view.month), (2023, 1));
    assert_eq!(view.title, "February 2023");
    assert_eq!(view.days.len(), 35);
    assert_eq!(view.days[0].date, "2023-01-29");
    assert!(!view.days[0].is_current_month);
    assert_eq!(view.days[0].progress, None);
    assert!(view.habits.iter().any(|h| h.id == habit.id));

    let day = view.days.iter().find(|d| d.date == "2023-02-14").unwrap();
    assert!(day.is_current_month);
    assert_eq!(day.completed_count, 1);
    assert_eq!(
        day.progress.as_deref(),
        Some(format!("1/{}", view.habits.len()).as_str())
    );
    assert!(day
        .habits
        .iter()
        .any(|status| status.habit_id == habit.id && status.completed));

    let untoggled = toggle(&client, &server.base_url, &habit.id, "2023-02-14").await;
    assert!(!untoggled.completed);
}

#[tokio::test]
async fn http_delete_removes_habit_and_progress() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let doomed = create_habit(&client, &server.base_url, "Run").await;
    let kept = create_habit(&client, &server.base_url, "Stretch").await;
    toggle(&client, &server.base_url, &doomed.id, "2024-06-03").await;
    toggle(&client, &server.base_url, &kept.id, "2024-06-03").await;

    for _ in 0..2 {
        let response = client
            .delete(format!("{}/api/habits/{}", server.base_url, doomed.id))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 204);
    }

    let habits: Vec<Habit> = client
        .get(format!("{}/api/habits", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(habits.iter().all(|h| h.id != doomed.id));
    assert!(habits.iter().any(|h| h.id == kept.id));

    let view = calendar(&client, &server.base_url, 2024, 5).await;
    let day = view.days.iter().find(|d| d.date == "2024-06-03").unwrap();
    assert!(day.habits.iter().all(|status| status.habit_id != doomed.id));
    assert!(day
        .habits
        .iter()
        .any(|status| status.habit_id == kept.id && status.completed));
}

#[tokio::test]
async fn http_rejects_blank_names_and_bad_dates() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "name": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .post(format!("{}/api/progress/toggle", server.base_url))
        .json(&serde_json::json!({ "habitId": "whatever", "date": "2024-02-30" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn http_rejects_colors_that_are_not_hex() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for color in ["\"><img src=x onerror=alert(1)>", "red", "#12345"] {
        let response = client
            .post(format!("{}/api/habits", server.base_url))
            .json(&serde_json::json!({ "name": "Read", "color": color }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400, "{color}");
    }

    let habits: Vec<Habit> = client
        .get(format!("{}/api/habits", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(habits.iter().all(|habit| habit.color.starts_with('#') && habit.color.len() == 7));
}

#[tokio::test]
async fn http_rejects_months_outside_date_range() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/calendar?year=2147483647&month=12", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let still_serving = calendar(&client, &server.base_url, 2026, 0).await;
    assert_eq!(still_serving.title, "January 2026");
}

#[tokio::test]
async fn http_month_navigation_wraps_years() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    calendar(&client, &server.base_url, 2026, 0).await;
    let prev: MonthView = client
        .post(format!("{}/api/calendar/prev", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!((prev.year, prev.month), (2025, 11));

    let next: MonthView = client
        .post(format!("{}/api/calendar/next", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!((next.year, next.month), (2026, 0));
    assert_eq!(next.title, "January 2026");
}
