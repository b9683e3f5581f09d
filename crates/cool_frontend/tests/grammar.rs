use cool_frontend::{
    lex, parse_class, parse_expression, parse_feature, parse_formal, parse_source, Attribute,
    BinOp, Class, Error, Expr, Feature, Formal, LexErrorKind, Method, TypeAction,
};

fn class(name: &str, inherits: Option<&str>, features: Vec<Feature>) -> Class {
    Class {
        name: name.to_string(),
        inherits: inherits.map(str::to_string),
        features,
    }
}

fn attr(name: &str, ty: &str, init: Option<Expr>) -> Attribute {
    Attribute {
        name: name.to_string(),
        ty: ty.to_string(),
        init,
    }
}

fn formal(name: &str, ty: &str) -> Formal {
    Formal {
        name: name.to_string(),
        ty: ty.to_string(),
    }
}

fn feature(src: &str) -> Feature {
    parse_feature(&lex(src).unwrap()).unwrap()
}

fn expr(src: &str) -> Expr {
    parse_expression(src).unwrap()
}

// program ::= [[class;]]+

#[test]
fn program_single() {
    let prog = parse_source("class Main {};").unwrap();
    assert_eq!(prog.classes, vec![class("Main", None, vec![])]);
}

#[test]
fn program_multiple_in_source_order() {
    let prog = parse_source("class Ham { }; class Spam { }; class Main { };").unwrap();
    let names: Vec<_> = prog.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Ham", "Spam", "Main"]);
    assert!(prog.classes.iter().all(|c| c.inherits.is_none() && c.features.is_empty()));
}

#[test]
fn empty_program_is_rejected() {
    let err = parse_source("").unwrap_err();
    assert!(matches!(err, Error::Syntax(e) if e.is_unexpected_eof()));
}

#[test]
fn class_without_semicolon_is_rejected() {
    assert!(matches!(parse_source("class Main { }"), Err(Error::Syntax(_))));
}

// class ::= class TYPE [inherits TYPE] { [[feature;]]* }

#[test]
fn class_inheritance() {
    let c = parse_class(&lex("class Spam inherits Ham { };").unwrap()).unwrap();
    assert_eq!(c, class("Spam", Some("Ham"), vec![]));
}

#[test]
fn class_features() {
    let c = parse_class(&lex("class Spam { nine : Int; name : Str; };").unwrap()).unwrap();
    assert_eq!(
        c,
        class(
            "Spam",
            None,
            vec![
                Feature::Attribute(attr("nine", "Int", None)),
                Feature::Attribute(attr("name", "Str", None)),
            ]
        )
    );
}

#[test]
fn class_missing_closing_brace_is_a_syntax_error() {
    let err = parse_source("class Main { x : Int;\n;").unwrap_err();
    let Error::Syntax(err) = err else {
        panic!("expected a syntax error, got {err:?}");
    };
    assert_eq!(err.position.line, 2);
}

#[test]
fn lowercase_class_name_is_rejected() {
    assert!(parse_source("class main { };").is_err());
}

// feature ::= ID( [ formal [[, formal]]* ] ) : TYPE { expr }
//         ::= ID : TYPE [<- expr]

#[test]
fn attribute_with_initializer() {
    assert_eq!(
        feature(r#"spam : Ham <- "bacon";"#),
        Feature::Attribute(attr("spam", "Ham", Some(Expr::string("bacon"))))
    );
}

#[test]
fn method_without_formals() {
    assert_eq!(
        feature("spam() : Ham { 42 };"),
        Feature::Method(Method {
            name: "spam".into(),
            formals: vec![],
            ret_type: "Ham".into(),
            body: Expr::int(42),
        })
    );
}

#[test]
fn method_with_formals() {
    assert_eq!(
        feature("spam(bacon : Egg, sausage : Meat) : Ham { 42 };"),
        Feature::Method(Method {
            name: "spam".into(),
            formals: vec![formal("bacon", "Egg"), formal("sausage", "Meat")],
            ret_type: "Ham".into(),
            body: Expr::int(42),
        })
    );
}

#[test]
fn trailing_comma_in_formals_is_rejected() {
    assert!(parse_feature(&lex("spam(bacon : Egg,) : Ham { 42 };").unwrap()).is_err());
}

// formal ::= ID : TYPE

#[test]
fn formal_simple() {
    let f = parse_formal(&lex("spam : Ham").unwrap()).unwrap();
    assert_eq!(f, formal("spam", "Ham"));
}

// expressions

#[test]
fn literals_are_decoded() {
    assert_eq!(expr(r#""spam""#), Expr::Str("spam".into()));
    assert_eq!(expr("42"), Expr::Int(42));
    assert_eq!(expr("true"), Expr::Bool(true));
    assert_eq!(expr("fALSE"), Expr::Bool(false));
}

#[test]
fn precedence_of_product_over_sum() {
    assert_eq!(
        expr("30 + 12 * 2"),
        Expr::binary(
            BinOp::Add,
            Expr::int(30),
            Expr::binary(BinOp::Mul, Expr::int(12), Expr::int(2))
        )
    );
}

#[test]
fn comparisons_do_not_chain() {
    assert!(matches!(parse_expression("1 < 2 < 3"), Err(Error::Syntax(_))));
    assert!(matches!(parse_expression("1 <= 2 = 3"), Err(Error::Syntax(_))));
}

#[test]
fn let_with_multiple_bindings() {
    assert_eq!(
        expr("let x : Int <- 42, y : Bool <- false in x"),
        Expr::Let {
            bindings: vec![
                attr("x", "Int", Some(Expr::int(42))),
                attr("y", "Bool", Some(Expr::Bool(false))),
            ],
            body: Box::new(Expr::ident("x")),
        }
    );
}

#[test]
fn let_binding_may_reference_earlier_binding() {
    assert_eq!(
        expr("let x : Int <- 1, y : Int <- x in y"),
        Expr::Let {
            bindings: vec![
                attr("x", "Int", Some(Expr::int(1))),
                attr("y", "Int", Some(Expr::ident("x"))),
            ],
            body: Box::new(Expr::ident("y")),
        }
    );
}

#[test]
fn case_with_one_branch() {
    assert_eq!(
        expr(r#"case "spam" of x : Str => true; esac"#),
        Expr::Case {
            expr: Box::new(Expr::string("spam")),
            arms: vec![TypeAction {
                name: "x".into(),
                ty: "Str".into(),
                expr: Expr::Bool(true),
            }],
        }
    );
}

#[test]
fn case_without_branches_is_rejected() {
    assert!(matches!(
        parse_expression(r#"case "spam" of esac"#),
        Err(Error::Syntax(_))
    ));
}

#[test]
fn static_dispatch() {
    assert_eq!(
        expr("pub@Place.has_spam()"),
        Expr::method_call(
            Expr::ident("pub"),
            Some("Place".into()),
            "has_spam",
            vec![]
        )
    );
    assert_eq!(
        expr("pub.has_spam()"),
        Expr::method_call(Expr::ident("pub"), None, "has_spam", vec![])
    );
}

#[test]
fn block_value_is_its_elements() {
    assert_eq!(
        expr("{ x <- 1; x; }"),
        Expr::Block(vec![Expr::assign("x", Expr::int(1)), Expr::ident("x")])
    );
}

#[test]
fn unterminated_string_is_a_lexical_error() {
    let err = parse_source("class Main { s : String <- \"oops; };").unwrap_err();
    assert!(matches!(err, Error::Lex(e) if e.kind == LexErrorKind::UnterminatedString));
}

#[test]
fn unterminated_comment_is_a_lexical_error() {
    let err = parse_source("class Main { }; (* dangling").unwrap_err();
    assert!(matches!(err, Error::Lex(e) if e.kind == LexErrorKind::UnterminatedComment));
}

#[test]
fn comments_are_ignored_by_the_parser() {
    let src = "-- leading\nclass (* inline *) Main { -- trailing\n};";
    let prog = parse_source(src).unwrap();
    assert_eq!(prog.classes, vec![class("Main", None, vec![])]);
}

#[test]
fn full_program() {
    let src = r#"
        class List inherits IO {
            item : Object;
            next : List;

            init(i : Object, n : List) : List {
                {
                    item <- i;
                    next <- n;
                    self;
                }
            };

            flatten() : String {
                let string : String <-
                    case item of
                        i : Int => i2a(i);
                        s : String => s;
                        o : Object => { abort(); ""; };
                    esac
                in
                    if (isvoid next) then
                        string
                    else
                        string.concat(next.flatten())
                    fi
            };
        };

        class Main inherits IO {
            main() : Object {
                while not 10 <= count loop
                    count <- count + 1
                pool
            };
            count : Int <- ~1 * 0;
        };
    "#;
    let prog = parse_source(src).unwrap();
    assert_eq!(prog.classes.len(), 2);
    assert_eq!(prog.classes[0].features.len(), 4);
    assert_eq!(prog.classes[1].features.len(), 2);
}
