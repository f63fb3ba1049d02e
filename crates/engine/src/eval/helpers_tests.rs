use super::*;

#[test]
fn ordering_satisfies_matches_operator() {
    use Ordering::*;

    let cases: &[(Operator, [bool; 3])] = &[
        // results for [Less, Equal, Greater]
        (Operator::Lt, [true, false, false]),
        (Operator::Le, [true, true, false]),
        (Operator::Gt, [false, false, true]),
        (Operator::Ge, [false, true, true]),
    ];

    for (op, expected) in cases {
        for (ord, want) in [Less, Equal, Greater].into_iter().zip(expected) {
            assert_eq!(ordering_satisfies(ord, *op), *want, "{op:?} with {ord:?}");
        }
    }
}

#[test]
fn ordering_satisfies_rejects_non_ordering_operators() {
    for op in [Operator::Eq, Operator::Ne, Operator::Bang, Operator::Like] {
        for ord in [Ordering::Less, Ordering::Equal, Ordering::Greater] {
            assert!(!ordering_satisfies(ord, op), "{op:?} with {ord:?}");
        }
    }
}

#[test]
fn parse_int_accepts_signed_decimal_only() {
    assert_eq!(parse_int("filesize", Operator::Gt, "15"), Ok(15));
    assert_eq!(parse_int("filesize", Operator::Gt, "-3"), Ok(-3));

    for bad in ["", "1.5", "0x10", "ten", " 15"] {
        assert_eq!(
            parse_int("filesize", Operator::Gt, bad),
            Err(EvalError::NonNumericOperand {
                field: "filesize",
                op: ">",
                value: bad.to_string(),
            }),
            "{bad:?}"
        );
    }
}

#[test]
fn parse_date_accepts_three_forms() {
    let midnight = Local
        .with_ymd_and_hms(2024, 3, 1, 0, 0, 0)
        .earliest()
        .expect("valid local time")
        .timestamp();
    let afternoon = Local
        .with_ymd_and_hms(2024, 3, 1, 13, 45, 10)
        .earliest()
        .expect("valid local time")
        .timestamp();

    assert_eq!(parse_date("lastmod", "2024-03-01"), Ok(midnight));
    assert_eq!(parse_date("lastmod", "2024-03-01 13:45:10"), Ok(afternoon));
    assert_eq!(parse_date("lastmod", "1700000000"), Ok(1_700_000_000));
}

#[test]
fn parse_date_rejects_garbage() {
    for bad in ["yesterday", "2024-13-01", "2024/03/01", ""] {
        assert_eq!(
            parse_date("createdt", bad),
            Err(EvalError::InvalidDate {
                field: "createdt",
                value: bad.to_string(),
            }),
            "{bad:?}"
        );
    }
}

#[test]
fn like_match_cases() {
    let cases: &[(&str, &str, bool)] = &[
        ("script.sh", "%.sh", true),
        ("script.sh", "script%", true),
        ("script.sh", "%rip%", true),
        ("script.sh", "s_ript.sh", true),
        ("script.sh", "script.sh", true),
        ("script.sh", "%", true),
        ("", "%", true),
        ("", "", true),
        ("", "_", false),
        ("script.sh", "Script%", false),
        ("script.sh", "%.txt", false),
        ("script.sh", "script", false),
        ("aaa", "a%a%a", true),
        ("ab", "a%b%c", false),
        ("café", "caf_", true),
    ];

    for (text, pattern, expected) in cases {
        assert_eq!(
            like_match(text, pattern),
            *expected,
            "{text:?} LIKE {pattern:?}"
        );
    }
}
