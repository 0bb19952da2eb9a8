//! Usage dashboard - backend cost tracking and prompt reliability
//!
//! Two tabs: spend and rate limits for the current session plus global
//! statistics, and the prompt testing surface (health report, history,
//! manual runs).

use dioxus::prelude::*;

use casebook_domain::telemetry::{
    format_cost, HealthReport, RateLimitStatus, SessionUsage, TestRunSummary, TestSuite,
    UsageRecord, UsageStatistics,
};
use casebook_domain::SessionId;

use super::common::ModalFrame;
use crate::ports::outbound::ApiError;
use crate::presentation::services::{use_prompt_testing_service, use_usage_service};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Usage,
    Testing,
}

#[component]
pub fn UsageDashboard(session_id: Option<SessionId>, on_close: EventHandler<()>) -> Element {
    let mut tab = use_signal(|| Tab::Usage);

    rsx! {
        ModalFrame {
            title: "Usage Monitor".to_string(),
            on_close: move |_| on_close.call(()),

            div {
                class: "tabs",
                button {
                    class: if tab() == Tab::Usage { "tab tab--active" } else { "tab" },
                    onclick: move |_| tab.set(Tab::Usage),
                    "Cost & Limits"
                }
                button {
                    class: if tab() == Tab::Testing { "tab tab--active" } else { "tab" },
                    onclick: move |_| tab.set(Tab::Testing),
                    "Prompt Testing"
                }
            }

            if tab() == Tab::Usage {
                UsageTab { session_id: session_id.clone() }
            } else {
                TestingTab {}
            }
        }
    }
}

#[component]
fn UsageTab(session_id: Option<SessionId>) -> Element {
    let usage = use_usage_service();

    let stats_service = usage.clone();
    let mut statistics = use_resource(move || {
        let service = stats_service.clone();
        async move { service.statistics().await }
    });

    let session_service = usage.clone();
    let session_for_usage = session_id.clone();
    let mut session_usage = use_resource(move || {
        let service = session_service.clone();
        let session_id = session_for_usage.clone();
        async move {
            match session_id {
                Some(id) => {
                    let usage = service.session_usage(&id).await?;
                    let limits = service.rate_limits(&id).await?;
                    Ok::<_, ApiError>(Some((usage, limits)))
                }
                None => Ok(None),
            }
        }
    });

    let records_service = usage.clone();
    let session_for_records = session_id.clone();
    let mut records = use_resource(move || {
        let service = records_service.clone();
        let session_id = session_for_records.clone();
        async move { service.records(session_id.as_ref()).await }
    });

    rsx! {
        div {
            class: "dashboard",
            button {
                class: "button button--ghost",
                onclick: move |_| {
                    statistics.restart();
                    session_usage.restart();
                    records.restart();
                },
                "Refresh"
            }

            section {
                h3 { "This Session" }
                {match &*session_usage.read() {
                    None => rsx! { p { class: "muted", "Loading…" } },
                    Some(Err(e)) => rsx! { p { class: "error", "{e}" } },
                    Some(Ok(None)) => rsx! { p { class: "muted", "Start a case to track its cost." } },
                    Some(Ok(Some((usage, limits)))) => rsx! {
                        SessionUsageView { usage: usage.clone() }
                        RateLimitView { limits: limits.clone() }
                    },
                }}
            }

            section {
                h3 { "All Sessions" }
                {match &*statistics.read() {
                    None => rsx! { p { class: "muted", "Loading…" } },
                    Some(Err(e)) => rsx! { p { class: "error", "{e}" } },
                    Some(Ok(stats)) => rsx! { StatisticsView { stats: stats.clone() } },
                }}
            }

            section {
                h3 { "Recent Calls" }
                {match &*records.read() {
                    None => rsx! { p { class: "muted", "Loading…" } },
                    Some(Err(e)) => rsx! { p { class: "error", "{e}" } },
                    Some(Ok(records)) => rsx! { RecordsTable { records: records.clone() } },
                }}
            }
        }
    }
}

#[component]
fn SessionUsageView(usage: SessionUsage) -> Element {
    rsx! {
        div {
            class: "stat-row",
            Stat { label: "Cost", value: format_cost(usage.total_cost) }
            Stat { label: "Tokens", value: usage.total_tokens.to_string() }
            Stat { label: "Calls", value: usage.operation_count.to_string() }
        }
        BreakdownTable {
            rows: usage
                .service_breakdown
                .iter()
                .map(|(name, s)| (name.clone(), s.cost, s.tokens, s.calls()))
                .collect::<Vec<_>>(),
        }
    }
}

#[component]
fn RateLimitView(limits: RateLimitStatus) -> Element {
    let percent = (limits.cost_ratio() * 100.0).round();
    let class = if limits.within_limits { "meter" } else { "meter meter--over" };

    rsx! {
        div {
            class: "rate-limits",
            p {
                "Budget: {format_cost(limits.current_cost)} of {format_cost(limits.max_cost)} · "
                "{limits.recent_operations}/{limits.max_operations} recent calls"
            }
            div {
                class: "{class}",
                div { class: "meter__fill", style: "width: {percent}%;" }
            }
            if !limits.within_limits {
                p { class: "warning", "Rate limit reached; new AI requests may be refused." }
            }
        }
    }
}

#[component]
fn StatisticsView(stats: UsageStatistics) -> Element {
    rsx! {
        div {
            class: "stat-row",
            Stat { label: "Total cost", value: format_cost(stats.total_cost) }
            Stat { label: "Cases", value: stats.case_count.to_string() }
            Stat { label: "Avg / case", value: format_cost(stats.average_cost_per_case) }
            Stat { label: "Sessions", value: stats.session_count.to_string() }
        }
        BreakdownTable {
            rows: stats
                .operation_breakdown
                .iter()
                .map(|(name, op)| (name.clone(), op.cost, op.tokens, op.count))
                .collect::<Vec<_>>(),
        }
        if !stats.last_updated.is_empty() {
            p { class: "muted", "Updated {stats.last_updated}" }
        }
    }
}

#[component]
fn BreakdownTable(rows: Vec<(String, f64, u64, u64)>) -> Element {
    rsx! {
        table {
            class: "table",
            thead {
                tr { th { "Name" } th { "Cost" } th { "Tokens" } th { "Calls" } }
            }
            tbody {
                for (name, cost, tokens, calls) in rows.iter() {
                    tr {
                        key: "{name}",
                        td { "{name}" }
                        td { "{format_cost(*cost)}" }
                        td { "{tokens}" }
                        td { "{calls}" }
                    }
                }
            }
        }
    }
}

#[component]
fn RecordsTable(records: Vec<UsageRecord>) -> Element {
    rsx! {
        if records.is_empty() {
            p { class: "muted", "No calls recorded." }
        }
        table {
            class: "table",
            tbody {
                for record in records.iter().rev().take(20) {
                    tr {
                        key: "{record.id}",
                        class: if record.success { "" } else { "row--failed" },
                        td { "{record.timestamp}" }
                        td { "{record.operation}" }
                        td { {record.model_used.clone().unwrap_or_default()} }
                        td { {record.total_tokens.map(|t| t.to_string()).unwrap_or_default()} }
                        td { "{format_cost(record.estimated_cost)}" }
                    }
                }
            }
        }
    }
}

#[component]
fn Stat(label: &'static str, value: String) -> Element {
    rsx! {
        div {
            class: "stat",
            span { class: "stat__label", "{label}" }
            span { class: "stat__value", "{value}" }
        }
    }
}

#[component]
fn TestingTab() -> Element {
    let testing = use_prompt_testing_service();
    let mut running = use_signal(|| false);
    let mut last_run: Signal<Option<Result<(TestSuite, TestRunSummary), String>>> =
        use_signal(|| None);

    let report_service = testing.clone();
    let mut report = use_resource(move || {
        let service = report_service.clone();
        async move { service.health_report().await }
    });

    let history_service = testing.clone();
    let mut history = use_resource(move || {
        let service = history_service.clone();
        async move { service.test_history().await }
    });

    let cases_service = testing.clone();
    let test_cases = use_resource(move || {
        let service = cases_service.clone();
        async move { service.test_cases().await }
    });

    let run_service = testing.clone();
    let run_tests = move |_| {
        if running() {
            return;
        }
        running.set(true);
        let service = run_service.clone();
        spawn(async move {
            let result = service.run_tests(&[]).await.map_err(|e| e.to_string());
            if let Err(e) = &result {
                tracing::warn!(error = %e, "Prompt test run failed");
            }
            last_run.set(Some(result));
            running.set(false);
            report.restart();
            history.restart();
        });
    };

    rsx! {
        div {
            class: "dashboard",
            div {
                class: "dashboard__actions",
                button {
                    class: "button button--primary",
                    disabled: running(),
                    onclick: run_tests,
                    if running() { "Running tests…" } else { "Run All Tests" }
                }
                {match &*test_cases.read() {
                    Some(Ok(cases)) => rsx! { span { class: "muted", "{cases.len()} test case(s) available" } },
                    _ => rsx! {},
                }}
            }

            {match &*last_run.read() {
                None => rsx! {},
                Some(Err(e)) => rsx! { p { class: "error", "{e}" } },
                Some(Ok((suite, summary))) => rsx! {
                    div {
                        class: "stat-row",
                        Stat { label: "Run", value: suite.name.clone() }
                        Stat { label: "Passed", value: format!("{}/{}", summary.tests_passed, summary.tests_run) }
                        Stat { label: "Success", value: summary.success_rate.to_string() }
                        Stat { label: "Cost", value: summary.total_cost.to_string() }
                    }
                },
            }}

            section {
                h3 { "Health" }
                {match &*report.read() {
                    None => rsx! { p { class: "muted", "Loading…" } },
                    Some(Err(e)) => rsx! { p { class: "error", "{e}" } },
                    Some(Ok(report)) => rsx! { HealthView { report: report.clone() } },
                }}
            }

            section {
                h3 { "History" }
                {match &*history.read() {
                    None => rsx! { p { class: "muted", "Loading…" } },
                    Some(Err(e)) => rsx! { p { class: "error", "{e}" } },
                    Some(Ok(suites)) => rsx! {
                        ul {
                            class: "history",
                            for suite in suites.iter() {
                                li {
                                    key: "{suite.id}",
                                    "{suite.name}: {suite.tests_passed}/{suite.tests_run} passed ({suite.success_rate})"
                                }
                            }
                        }
                    },
                }}
            }
        }
    }
}

#[component]
fn HealthView(report: HealthReport) -> Element {
    let overall = report
        .overall_success_rate
        .as_ref()
        .map(|rate| rate.to_string())
        .unwrap_or_else(|| "n/a".to_string());

    rsx! {
        p {
            span { class: "badge badge--{report.overall_health}", "{report.overall_health}" }
            " Overall success: {overall}"
        }
        table {
            class: "table",
            tbody {
                for (prompt_type, health) in report.prompt_type_health.iter() {
                    tr {
                        key: "{prompt_type}",
                        td { "{prompt_type}" }
                        td { "{health.passed_tests}/{health.total_tests}" }
                        td { "{health.success_rate}" }
                    }
                }
            }
        }
        if let Some(recommendation) = report.recommendation.as_ref() {
            p { class: "muted", "{recommendation}" }
        }
    }
}
