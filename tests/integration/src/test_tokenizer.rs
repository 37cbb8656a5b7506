//! Tokenizing realistic request expressions.

#[cfg(test)]
mod tests {
    use docstore_core::error::expression_error_to_store;
    use docstore_core::{ExpressionError, Symbol, Token, TokenKind, tokenize};
    use docstore_model::StoreErrorCode;

    fn non_space(expression: &str) -> Vec<(TokenKind, String)> {
        tokenize(expression)
            .unwrap()
            .into_iter()
            .filter(|t| !t.is_whitespace())
            .map(|t| (t.kind(), t.text().to_owned()))
            .collect()
    }

    #[test]
    fn test_should_tokenize_condition_expression() {
        let tokens = non_space("attribute_not_exists(#pk) AND #v = :expected");
        let kinds: Vec<TokenKind> = tokens.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Attribute,
                TokenKind::Symbol(Symbol::OpenRoundBracket),
                TokenKind::AttributeNamePlaceholder,
                TokenKind::Symbol(Symbol::CloseRoundBracket),
                TokenKind::Attribute,
                TokenKind::AttributeNamePlaceholder,
                TokenKind::Symbol(Symbol::Equal),
                TokenKind::AttributeValuePlaceholder,
            ]
        );
        assert_eq!(tokens[4].1, "AND");
        assert_eq!(tokens[7].1, ":expected");
    }

    #[test]
    fn test_should_preserve_source_text() {
        let expression = "SET a.b[3] = :x,  #c = #c - :one  REMOVE d";
        let rebuilt: String = tokenize(expression)
            .unwrap()
            .iter()
            .map(Token::text)
            .collect();
        assert_eq!(rebuilt, expression);
    }

    #[test]
    fn test_should_tokenize_projection_list() {
        assert_eq!(
            non_space("id,details.color, sizes[0]"),
            vec![
                (TokenKind::Attribute, "id".to_owned()),
                (TokenKind::Symbol(Symbol::Comma), ",".to_owned()),
                (TokenKind::Attribute, "details".to_owned()),
                (TokenKind::Symbol(Symbol::Dot), ".".to_owned()),
                (TokenKind::Attribute, "color".to_owned()),
                (TokenKind::Symbol(Symbol::Comma), ",".to_owned()),
                (TokenKind::Attribute, "sizes".to_owned()),
                (TokenKind::Symbol(Symbol::OpenSquareBracket), "[".to_owned()),
                (TokenKind::Number, "0".to_owned()),
                (TokenKind::Symbol(Symbol::CloseSquareBracket), "]".to_owned()),
            ]
        );
    }

    #[test]
    fn test_should_surface_errors_as_validation_exceptions() {
        let err = tokenize("a < :b")
            .map_err(expression_error_to_store)
            .unwrap_err();
        assert_eq!(err.code, StoreErrorCode::ValidationException);
        assert_eq!(
            err.to_json()["message"],
            r#"Invalid expression: Syntax error; token: "<", near: "a <""#
        );

        let err = tokenize("#_bad = :v").unwrap_err();
        assert_eq!(
            err.to_string(),
            r##"ExpressionAttributeNames contains invalid key: Syntax error; key: "#_bad""##
        );
    }

    #[test]
    fn test_should_reject_names_that_need_placeholders() {
        for expression in ["price$ = :v", "a = :v;", "a.b c@d"] {
            assert!(
                matches!(tokenize(expression), Err(ExpressionError::InvalidToken { .. })),
                "{expression}"
            );
        }
        // A dash is a symbol, so the name silently splits in two.
        assert_eq!(
            non_space("a-b"),
            vec![
                (TokenKind::Attribute, "a".to_owned()),
                (TokenKind::Symbol(Symbol::Minus), "-".to_owned()),
                (TokenKind::Attribute, "b".to_owned()),
            ]
        );
    }
}
