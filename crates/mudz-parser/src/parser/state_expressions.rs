//! Parser state - expression parsing.
//!
//! Binary operators use precedence climbing; assignment and `?:` are right
//! associative and sit above the binary levels.

use super::base::NodeIndex;
use super::node::{ArgumentList, ExpectedKind, LiteralValue, NodeData};
use super::state::ParserState;
use mudz_scanner::{SyntaxKind, TokenValue, token_is_assignment_operator, token_is_type_keyword};

/// Binding power of a binary operator; 0 for tokens that are not one.
fn binary_precedence(kind: SyntaxKind) -> u8 {
    match kind {
        SyntaxKind::BarBarToken => 1,
        SyntaxKind::AmpersandAmpersandToken => 2,
        SyntaxKind::BarToken => 3,
        SyntaxKind::CaretToken => 4,
        SyntaxKind::AmpersandToken => 5,
        SyntaxKind::EqualsEqualsToken | SyntaxKind::ExclamationEqualsToken => 6,
        SyntaxKind::LessThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::GreaterThanEqualsToken => 7,
        SyntaxKind::LessThanLessThanToken | SyntaxKind::GreaterThanGreaterThanToken => 8,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 9,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 10,
        _ => 0,
    }
}

/// Tokens that can begin an operand; used to confirm `(Name)` casts.
fn is_operand_start(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::IntegerLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::CharacterLiteral
            | SyntaxKind::SymbolLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NilKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenParenBraceToken
            | SyntaxKind::OpenParenBracketToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ColonColonToken
    )
}

impl ParserState {
    /// Whether the current token can begin an expression.
    pub(crate) fn is_start_of_expression(&self) -> bool {
        is_operand_start(self.token())
            || matches!(
                self.token(),
                SyntaxKind::MinusToken
                    | SyntaxKind::PlusToken
                    | SyntaxKind::PlusPlusToken
                    | SyntaxKind::MinusMinusToken
            )
    }

    // =========================================================================
    // Parse Methods - Expressions
    // =========================================================================

    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        self.parse_assignment_expression()
    }

    fn parse_assignment_expression(&mut self) -> NodeIndex {
        let left = self.parse_conditional_expression();
        if !token_is_assignment_operator(self.token()) {
            return left;
        }
        let start = self.token_pos();
        let operator = self.next_token().kind;
        let right = self.nested(|p| p.parse_assignment_expression());
        self.finish_node(
            start,
            NodeData::Binary {
                left,
                operator,
                right,
            },
        )
    }

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let condition = self.parse_binary_expression(0);
        if !self.is_token(SyntaxKind::QuestionToken) {
            return condition;
        }
        let start = self.token_pos();
        self.next_token();
        let when_true = self.nested(|p| p.parse_assignment_expression());
        let when_false = if self.parse_expected(SyntaxKind::ColonToken) {
            self.nested(|p| p.parse_assignment_expression())
        } else {
            NodeIndex::NONE
        };
        self.finish_node(
            start,
            NodeData::Conditional {
                condition,
                when_true,
                when_false,
            },
        )
    }

    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let mut left = self.parse_unary_expression();
        loop {
            let precedence = binary_precedence(self.token());
            if precedence == 0 || precedence <= min_precedence {
                return left;
            }
            let start = self.token_pos();
            let operator = self.next_token().kind;
            let right = self.parse_binary_expression(precedence);
            left = self.finish_node(
                start,
                NodeData::Binary {
                    left,
                    operator,
                    right,
                },
            );
        }
    }

    pub(crate) fn parse_unary_expression(&mut self) -> NodeIndex {
        self.nested(|p| p.parse_unary_worker())
    }

    fn parse_unary_worker(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let is_cast = self.is_token(SyntaxKind::OpenParenToken) && self.is_start_of_cast();
        match self.token() {
            SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::MinusToken
            | SyntaxKind::PlusToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken => {
                let operator = self.next_token().kind;
                let operand = self.parse_unary_expression();
                self.finish_node(start, NodeData::PrefixUnary { operator, operand })
            }
            SyntaxKind::OpenParenToken if is_cast => {
                self.next_token();
                let ty = self.parse_type();
                self.parse_expected(SyntaxKind::CloseParenToken);
                let expression = self.parse_unary_expression();
                self.finish_node(start, NodeData::Cast { ty, expression })
            }
            _ => self.parse_postfix_expression(),
        }
    }

    /// `(` followed by a type keyword, or `( Name )` followed by an operand.
    fn is_start_of_cast(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if token_is_type_keyword(p.token()) {
                return true;
            }
            if !p.is_token(SyntaxKind::Identifier) {
                return false;
            }
            p.next_token();
            while p.is_token(SyntaxKind::OpenBracketToken)
                && p.peek() == SyntaxKind::CloseBracketToken
            {
                p.next_token();
                p.next_token();
            }
            if !p.is_token(SyntaxKind::CloseParenToken) {
                return false;
            }
            p.next_token();
            is_operand_start(p.token())
        })
    }

    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let mut expression = self.parse_primary_expression();
        loop {
            let start = self.arena.get(expression).map_or(self.token_pos(), |n| n.pos);
            expression = match self.token() {
                SyntaxKind::OpenParenToken => {
                    let arguments = self.parse_argument_list();
                    self.finish_node(
                        start,
                        NodeData::Call {
                            callee: expression,
                            arguments,
                        },
                    )
                }
                SyntaxKind::OpenBracketToken => self.parse_index(start, expression),
                SyntaxKind::MinusGreaterThanToken | SyntaxKind::DotToken => {
                    let arrow = self.next_token().kind == SyntaxKind::MinusGreaterThanToken;
                    let name = if self.is_token(SyntaxKind::Identifier) {
                        self.parse_identifier()
                    } else {
                        self.missing_or_wrong(
                            "Member name expected.",
                            Some(ExpectedKind::Identifier),
                        )
                    };
                    self.finish_node(
                        start,
                        NodeData::MemberAccess {
                            expression,
                            name,
                            arrow,
                        },
                    )
                }
                SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => {
                    let operator = self.next_token().kind;
                    self.finish_node(
                        start,
                        NodeData::PostfixUnary {
                            operand: expression,
                            operator,
                        },
                    )
                }
                _ => return expression,
            };
        }
    }

    /// `[i]`, `[i..j]` or `[i..]`; the cursor is on `[`.
    fn parse_index(&mut self, start: u32, expression: NodeIndex) -> NodeIndex {
        self.next_token();
        let index = if self.is_token(SyntaxKind::DotDotToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        let mut range_end = NodeIndex::NONE;
        let is_range = self.parse_optional(SyntaxKind::DotDotToken);
        if is_range && !self.is_token(SyntaxKind::CloseBracketToken) {
            range_end = self.parse_expression();
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(
            start,
            NodeData::Index {
                expression,
                index,
                range_end,
                is_range,
            },
        )
    }

    /// `( arg, arg... )`; the cursor is on `(`.
    pub(crate) fn parse_argument_list(&mut self) -> ArgumentList {
        let pos = self.token_pos();
        self.next_token();
        let mut items = Vec::new();

        if !self.is_token(SyntaxKind::CloseParenToken) {
            loop {
                let start = self.token_pos();
                let mut argument = self.parse_expression();
                if self.parse_optional(SyntaxKind::DotDotDotToken) {
                    argument = self.finish_node(
                        start,
                        NodeData::Spread {
                            expression: argument,
                        },
                    );
                }
                items.push(argument);
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);

        let end = items
            .last()
            .and_then(|&last| self.arena.get(last))
            .map_or(self.prev_end, |n| n.end.max(self.prev_end));
        ArgumentList { pos, end, items }
    }

    // =========================================================================
    // Parse Methods - Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::Identifier if self.is_invalid_character() => {
                self.create_wrong("Invalid character.", Some(ExpectedKind::Identifier))
            }
            SyntaxKind::Identifier => self.parse_identifier(),
            SyntaxKind::ColonColonToken => {
                // `::name` calls the inherited definition.
                self.next_token();
                let name = if self.is_token(SyntaxKind::Identifier) {
                    let token = self.next_token();
                    format!("::{}", token.text().unwrap_or_default())
                } else {
                    self.error_at_current("Identifier expected.".to_string());
                    "::".to_string()
                };
                self.finish_node(start, NodeData::Identifier { name })
            }
            SyntaxKind::IntegerLiteral => {
                let value = self.next_token().integer().unwrap_or_default();
                self.literal(start, LiteralValue::Int(value))
            }
            SyntaxKind::CharacterLiteral => {
                let value = self.next_token().character().unwrap_or('\0');
                self.literal(start, LiteralValue::Char(value))
            }
            SyntaxKind::SymbolLiteral => {
                let value = self.next_token().text().unwrap_or_default().to_string();
                self.literal(start, LiteralValue::Symbol(value))
            }
            SyntaxKind::StringLiteral => self.parse_string_literals(),
            SyntaxKind::TrueKeyword => {
                self.next_token();
                self.literal(start, LiteralValue::Bool(true))
            }
            SyntaxKind::FalseKeyword => {
                self.next_token();
                self.literal(start, LiteralValue::Bool(false))
            }
            SyntaxKind::NilKeyword => {
                self.next_token();
                self.literal(start, LiteralValue::Nil)
            }
            SyntaxKind::ThisKeyword => {
                self.next_token();
                self.literal(start, LiteralValue::This)
            }
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression = self.parse_expression();
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.finish_node(start, NodeData::Parenthesized { expression })
            }
            SyntaxKind::OpenParenBraceToken => self.parse_array_literal(),
            SyntaxKind::OpenParenBracketToken => self.parse_mapping_literal(),
            _ => self.missing_or_wrong("Expression expected.", Some(ExpectedKind::Identifier)),
        }
    }

    fn literal(&mut self, start: u32, value: LiteralValue) -> NodeIndex {
        self.finish_node(start, NodeData::Literal { value })
    }

    /// One string literal, or a `StringConcat` of adjacent ones.
    pub(crate) fn parse_string_literals(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut parts = Vec::new();
        while self.is_token(SyntaxKind::StringLiteral) {
            let pos = self.token_pos();
            let text = match self.next_token().value {
                Some(TokenValue::Text(text)) => text,
                _ => String::new(),
            };
            parts.push(self.literal(pos, LiteralValue::String(text)));
        }
        match parts.as_slice() {
            [single] => *single,
            _ => self.finish_node(start, NodeData::StringConcat { parts }),
        }
    }

    /// `new Type(args)` or `new "path"(args)`.
    fn parse_new_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let target = if self.is_token(SyntaxKind::StringLiteral) {
            self.parse_string_literals()
        } else {
            self.parse_type()
        };
        let arguments = self
            .is_token(SyntaxKind::OpenParenToken)
            .then(|| self.parse_argument_list());
        self.finish_node(start, NodeData::New { target, arguments })
    }

    /// `({ a, b, })`
    fn parse_array_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            elements.push(self.parse_expression());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                if self.token_pos() == before && !self.is_token(SyntaxKind::CloseBraceToken) {
                    elements.push(self.create_wrong("',' expected.", None));
                    continue;
                }
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(start, NodeData::ArrayLiteral { elements })
    }

    /// `([ key : value, ])`
    fn parse_mapping_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let mut entries = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            let entry_start = self.token_pos();
            let key = self.parse_expression();
            let value = if self.parse_expected(SyntaxKind::ColonToken) {
                self.parse_expression()
            } else {
                NodeIndex::NONE
            };
            entries.push(self.finish_node(entry_start, NodeData::MappingEntry { key, value }));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                if self.token_pos() == before && !self.is_token(SyntaxKind::CloseBracketToken) {
                    entries.push(self.create_wrong("',' expected.", None));
                    continue;
                }
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(start, NodeData::MappingLiteral { entries })
    }
}
