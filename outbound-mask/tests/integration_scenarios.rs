//! End-to-end scenarios: handlers build envelopes, the interceptor masks them.
//!
//! Each test mirrors an endpoint of the surrounding service and checks both
//! that the sensitive field is masked and that nothing else moved.

use chrono::NaiveDate;
use outbound_mask::{
    ApiResult, DataBase, ExplainResult, History, JobInfoDetail, MaskingConfig, ProTableResult,
    ResponseEnvelope, ResponseInterceptor, SqlExplainResult,
};

const MASK: &str = "'password'='******'";

fn interceptor() -> ResponseInterceptor {
    ResponseInterceptor::new(&MaskingConfig::default()).unwrap()
}

fn history(id: i64, statement: &str) -> History {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(8, 30, id as u32))
        .unwrap();
    History {
        id: Some(id),
        job_id: Some(format!("job-{id}")),
        job_name: Some("orders_sync".into()),
        status: Some(2),
        statement: Some(statement.into()),
        start_time: Some(start),
        end_time: Some(start + chrono::Duration::minutes(5)),
        ..History::default()
    }
}

#[test]
fn explain_sql_masks_sql_of_every_statement() {
    let batch = ExplainResult {
        correct: true,
        total: 2,
        sql_explain_results: vec![
            SqlExplainResult {
                index: 1,
                sql: Some("select * from t where 'password'='secret'".into()),
                parse_true: true,
                ..SqlExplainResult::default()
            },
            SqlExplainResult {
                index: 2,
                sql: Some("select * from t where pass='secret'".into()),
                ..SqlExplainResult::default()
            },
        ],
    };
    let response = interceptor().intercept(ApiResult::succeed(batch, "explained").into());

    let batch = response
        .as_api()
        .and_then(|r| r.datas_ref::<ExplainResult>())
        .unwrap();
    assert_eq!(
        batch.sql_explain_results[0].sql.as_deref(),
        Some("select * from t where 'password'='******'")
    );
    // only the literal `password` key is sensitive
    assert_eq!(
        batch.sql_explain_results[1].sql.as_deref(),
        Some("select * from t where pass='secret'")
    );
    assert!(batch.sql_explain_results[0].parse_true);
    assert_eq!(batch.total, 2);
}

#[test]
fn studio_explain_masks_bare_list() {
    let entries = vec![SqlExplainResult {
        index: 1,
        sql: Some("create table s with ('password' = 'x', 'url'='jdbc:mysql://db')".into()),
        ..SqlExplainResult::default()
    }];
    let response = interceptor().intercept(ApiResult::succeed(entries, "ok").into());

    let entries = response
        .as_api()
        .and_then(|r| r.datas_ref::<Vec<SqlExplainResult>>())
        .unwrap();
    assert_eq!(
        entries[0].sql.as_deref(),
        Some("create table s with ('password'='******', 'url'='jdbc:mysql://db')")
    );
}

#[test]
fn history_page_only_alters_statements() {
    let rows = vec![
        history(1, "insert into sink select * from src"),
        history(2, "create table src with ('password'='root123')"),
    ];
    let before = rows.clone();
    let response = interceptor().intercept(ProTableResult::page(rows, 2, 1, 10).into());

    let after = response
        .as_table()
        .and_then(|r| r.data_ref::<Vec<History>>())
        .unwrap();
    assert_eq!(after.len(), before.len());
    for (before, after) in before.iter().zip(after) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.job_id, after.job_id);
        assert_eq!(before.job_name, after.job_name);
        assert_eq!(before.status, after.status);
        assert_eq!(before.start_time, after.start_time);
        assert_eq!(before.end_time, after.end_time);
    }
    assert_eq!(after[0].statement, before[0].statement);
    assert_eq!(
        after[1].statement.as_deref(),
        Some("create table src with ('password'='******')")
    );
}

#[test]
fn single_history_is_masked() {
    let response = interceptor()
        .intercept(ApiResult::succeed(history(7, "'password'='a' 'password'='b'"), "ok").into());
    let history = response
        .as_api()
        .and_then(|r| r.datas_ref::<History>())
        .unwrap();
    assert_eq!(history.statement.as_deref(), Some(&*format!("{MASK} {MASK}")));
}

#[test]
fn job_detail_masks_nested_history() {
    let detail = JobInfoDetail {
        id: Some(3),
        instance_name: Some("orders".into()),
        history: Some(history(3, "'password'='nested'")),
        ..JobInfoDetail::default()
    };
    let response = interceptor().intercept(ApiResult::succeed(detail, "ok").into());
    let detail = response
        .as_api()
        .and_then(|r| r.datas_ref::<JobInfoDetail>())
        .unwrap();
    assert_eq!(detail.instance_name.as_deref(), Some("orders"));
    assert_eq!(
        detail.history.as_ref().and_then(|h| h.statement.as_deref()),
        Some(MASK)
    );
}

#[test]
fn database_password_and_flink_config_are_masked() {
    let database = DataBase {
        id: Some(1),
        name: Some("warehouse".into()),
        url: Some("jdbc:mysql://db:3306/dw".into()),
        username: Some("etl".into()),
        password: Some("abcdefgh12".into()),
        flink_config: Some("'password'='topsecret'".into()),
        enabled: true,
        ..DataBase::default()
    };
    let response = interceptor().intercept(ApiResult::succeed(database, "ok").into());

    let database = response
        .as_api()
        .and_then(|r| r.datas_ref::<DataBase>())
        .unwrap();
    // from = 2, to = 2 * 10 / 3 = 6
    assert_eq!(database.password.as_deref(), Some("ab****gh12"));
    assert_eq!(database.flink_config.as_deref(), Some(MASK));
    assert_eq!(database.username.as_deref(), Some("etl"));
    assert_eq!(database.url.as_deref(), Some("jdbc:mysql://db:3306/dw"));
    assert!(database.enabled);
}

#[test]
fn database_list_masks_every_entry() {
    let databases: Vec<DataBase> = ["abcdefgh12", "p4ssw0rd!", "xy"]
        .into_iter()
        .map(|password| DataBase {
            password: Some(password.into()),
            flink_config: None,
            ..DataBase::default()
        })
        .collect();
    let response = interceptor().intercept(ProTableResult::page(databases, 3, 1, 10).into());

    let passwords: Vec<_> = response
        .as_table()
        .and_then(|r| r.data_ref::<Vec<DataBase>>())
        .unwrap()
        .iter()
        .map(|d| d.password.clone().unwrap())
        .collect();
    assert_eq!(passwords, vec!["ab****gh12", "p4****rd!", "xy"]);
}

#[test]
fn empty_list_passes_through() {
    let response =
        interceptor().intercept(ProTableResult::page(Vec::<History>::new(), 0, 1, 10).into());
    let table = response.as_table().unwrap();
    assert_eq!(table.data_ref::<Vec<History>>().map(Vec::len), Some(0));
    assert_eq!(table.total, 0);
}

#[test]
fn unrecognized_payload_passes_through() {
    let response = interceptor().intercept(ApiResult::succeed(42_u64, "count").into());
    let result = response.as_api().unwrap();
    assert_eq!(result.datas_ref::<u64>(), Some(&42));
    assert_eq!(result.msg.as_deref(), Some("count"));
}

#[test]
fn raw_response_passes_through() {
    let response = interceptor().intercept(ResponseEnvelope::Raw(Box::new(history(
        1,
        "'password'='raw'",
    ))));
    match response {
        ResponseEnvelope::Raw(payload) => {
            let history = payload.downcast_ref::<History>().unwrap();
            assert_eq!(history.statement.as_deref(), Some("'password'='raw'"));
        }
        other => panic!("unexpected envelope {other:?}"),
    }
}

#[test]
fn guarded_handler_masks_each_response() {
    let interceptor = interceptor();
    let list_databases = interceptor.guard(|page: u32| {
        ProTableResult::page(
            vec![DataBase {
                password: Some(format!("password-{page}")),
                ..DataBase::default()
            }],
            1,
            page,
            10,
        )
        .into()
    });

    for page in 1..=3 {
        let response = list_databases(page);
        let table = response.as_table().unwrap();
        assert_eq!(table.current, page);
        let password = table.data_ref::<Vec<DataBase>>().unwrap()[0]
            .password
            .clone()
            .unwrap();
        // "password-N" has 10 characters
        assert_eq!(password, format!("pa****rd-{page}"));
    }
}

#[test]
fn interceptor_runs_concurrently_on_independent_responses() {
    let interceptor = interceptor();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|id| {
                let interceptor = &interceptor;
                scope.spawn(move || {
                    let response = interceptor.intercept(
                        ApiResult::succeed(history(id, "'password'='t'"), "ok").into(),
                    );
                    response
                        .as_api()
                        .and_then(|r| r.datas_ref::<History>())
                        .and_then(|h| h.statement.clone())
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().as_deref(), Some(MASK));
        }
    });
}
