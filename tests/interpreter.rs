//! End-to-end dialogue behavior against the shipped customer-service
//! script and small purpose-built scripts.

use std::io::Cursor;

use kefu::Session;

const CUSTOMER_SERVICE: &str = include_str!("../scripts/example.dsl");

fn service_session(balance: f64) -> Session {
    kefu::build(CUSTOMER_SERVICE, balance).expect("script should build")
}

#[test]
fn initial_mode_dispatches_and_transitions() {
    let mut session = service_session(0.0);

    assert_eq!(
        session.process_input("你好").as_deref(),
        Some("您好，很高兴为您服务，请问您的需要是")
    );

    assert_eq!(session.process_input("账户").as_deref(), Some("已转移至账户模式"));
    assert_eq!(session.current_mode(), "ACCOUNT");

    assert_eq!(session.process_input("退出").as_deref(), Some("您已退出账户模式"));
    assert_eq!(session.current_mode(), "INIT");

    assert_eq!(session.process_input("商品").as_deref(), Some("已转移至商品模式"));
    assert_eq!(session.current_mode(), "GOODS");
}

#[test]
fn balance_query_appends_two_decimals() {
    let mut session = service_session(50.0);

    session.process_input("账户");
    // The configured response ends with a space of its own; the appended
    // balance adds one more.
    assert_eq!(
        session.process_input("余额").as_deref(),
        Some("您的余额为  50.00")
    );
}

#[test]
fn goods_and_query_modes() {
    let mut session = service_session(0.0);

    session.process_input("商品");
    assert_eq!(
        session.process_input("名称").as_deref(),
        Some("在售商品的名称为：商品A, 商品B, 商品C")
    );
    assert_eq!(
        session.process_input("查询").as_deref(),
        Some("已转移至查询模式，输入对应商品名称查询信息")
    );
    assert_eq!(
        session.process_input("商品A").as_deref(),
        Some("商品A：价格：100元，库存：50件")
    );
    assert_eq!(
        session.process_input("退出").as_deref(),
        Some("您已退出商品查询模式")
    );
}

#[test]
fn unmatched_input_falls_through_to_else() {
    let mut session = service_session(0.0);
    assert_eq!(
        session.process_input("别的什么").as_deref(),
        Some("抱歉，我没有理解您的问题")
    );
}

#[test]
fn if_rules_win_over_elif_rules() {
    let mut session = kefu::build(
        r#"
        start
        INIT
            if "A" in user_input then
                response "from if"
            elif "B" in user_input then
                response "from elif"
        end
        "#,
        0.0,
    )
    .expect("script should build");

    // Input containing both substrings selects the if-rule.
    assert_eq!(session.process_input("A and B").as_deref(), Some("from if"));
    assert_eq!(session.process_input("only B").as_deref(), Some("from elif"));
}

#[test]
fn no_match_and_no_else_yields_no_response() {
    let mut session = kefu::build(
        r#"
        start
        INIT
            if "A" in user_input then
                response "from if"
        end
        "#,
        0.0,
    )
    .expect("script should build");

    assert_eq!(session.process_input("nothing relevant"), None);
}

#[test]
fn recharge_replaces_the_configured_response_and_updates_the_balance() {
    let mut session = service_session(50.0);
    session.process_input("账户");

    let mut amounts = Cursor::new("100\n");
    assert_eq!(
        session.process_input_from("充值", &mut amounts).as_deref(),
        Some("充值成功！您的新余额为 150.00 元")
    );

    assert_eq!(
        session.process_input("余额").as_deref(),
        Some("您的余额为  150.00")
    );
}

#[test]
fn recharge_outside_the_account_mode_is_refused() {
    let mut session = kefu::build(
        r#"
        start
        INIT
            else
                response "抱歉，我没有理解您的问题"
        end
        "#,
        0.0,
    )
    .expect("script should build");

    // The else rule matches, but the trigger diverts the turn and the
    // refusal comes back instead of the configured response.
    let mut amounts = Cursor::new("");
    assert_eq!(
        session.process_input_from("充值", &mut amounts).as_deref(),
        Some("无法进行充值操作。请先进入账户模式。")
    );
    assert_eq!(session.balance(), 0.0);
}

#[test]
fn invalid_recharge_amounts_never_touch_the_balance() {
    let mut session = service_session(10.0);
    session.process_input("账户");

    let mut amounts = Cursor::new("-3\n笑\n2.5\n");
    assert_eq!(
        session.process_input_from("充值", &mut amounts).as_deref(),
        Some("充值成功！您的新余额为 12.50 元")
    );
    assert_eq!(session.balance(), 12.5);
}

#[test]
fn sessions_can_share_one_parsed_program() {
    let program = kefu::parse(CUSTOMER_SERVICE).expect("script should parse");

    let mut first = Session::new(&program, 1.0);
    let mut second = Session::new(&program, 2.0);

    first.process_input("账户");
    assert_eq!(first.current_mode(), "ACCOUNT");
    // The sibling session is untouched: still in INIT, where a balance
    // query only reaches the fallback rule.
    assert_eq!(second.current_mode(), "INIT");
    assert_eq!(
        second.process_input("余额").as_deref(),
        Some("抱歉，我没有理解您的问题")
    );
}
