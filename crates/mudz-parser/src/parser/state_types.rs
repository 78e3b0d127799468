//! Parser state - types, parameters and modifiers.

use super::base::NodeIndex;
use super::node::{ArgumentList, ExpectedKind, ModifierFlags, NodeData};
use super::state::ParserState;
use mudz_scanner::{SyntaxKind, token_is_modifier, token_is_type_keyword, token_to_text};

impl ParserState {
    // =========================================================================
    // Parse Methods - Types
    // =========================================================================

    /// Whether the current token can begin a type.
    pub(crate) fn is_start_of_type(&self) -> bool {
        token_is_type_keyword(self.token())
            || self.is_token(SyntaxKind::NilKeyword)
            || (self.is_token(SyntaxKind::Identifier) && !self.is_invalid_character())
    }

    /// Parse a type: a base type followed by any number of `[]` suffixes.
    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        self.nested(|p| p.parse_type_worker())
    }

    fn parse_type_worker(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let kind = self.token();

        if kind == SyntaxKind::FunctionKeyword && self.peek() == SyntaxKind::LessThanToken {
            return self.parse_function_type();
        }

        if !self.is_start_of_type() {
            return self.missing_or_wrong("Type expected.", Some(ExpectedKind::Type));
        }

        let token = self.next_token();
        let name = match token.text() {
            Some(text) if kind == SyntaxKind::Identifier => text.to_string(),
            _ => token_to_text(kind).unwrap_or_default().into_owned(),
        };
        let array_depth = self.parse_array_suffix();
        self.finish_node(
            start,
            NodeData::TypeName {
                keyword: kind,
                name,
                array_depth,
            },
        )
    }

    /// `function<ret(param, ...)>`
    fn parse_function_type(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token(); // function
        self.next_token(); // <

        let return_type = self.parse_type();
        let mut parameters = Vec::new();
        let mut variadic = false;

        if self.parse_expected(SyntaxKind::OpenParenToken) {
            if !self.is_token(SyntaxKind::CloseParenToken) {
                loop {
                    if self.is_token(SyntaxKind::DotDotDotToken) {
                        let pos = self.token_pos();
                        self.next_token();
                        variadic = true;
                        parameters.push(self.finish_node(pos, NodeData::Ellipsis));
                    } else {
                        parameters.push(self.parse_type());
                    }
                    if !self.parse_optional(SyntaxKind::CommaToken) {
                        break;
                    }
                }
            }
            self.parse_expected(SyntaxKind::CloseParenToken);
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);

        let array_depth = self.parse_array_suffix();
        self.finish_node(
            start,
            NodeData::FunctionType {
                return_type,
                parameters,
                variadic,
                array_depth,
            },
        )
    }

    /// Count trailing `[]` pairs. A `[` not followed by `]` is left alone.
    fn parse_array_suffix(&mut self) -> u32 {
        let mut depth = 0;
        while self.is_token(SyntaxKind::OpenBracketToken)
            && self.peek() == SyntaxKind::CloseBracketToken
        {
            self.next_token();
            self.next_token();
            depth += 1;
        }
        depth
    }

    // =========================================================================
    // Parse Methods - Modifiers
    // =========================================================================

    pub(crate) fn parse_modifiers(&mut self) -> (Vec<NodeIndex>, ModifierFlags) {
        let mut modifiers = Vec::new();
        let mut flags = ModifierFlags::empty();
        while token_is_modifier(self.token()) {
            let start = self.token_pos();
            let keyword = self.token();
            self.next_token();
            flags |= ModifierFlags::from_keyword(keyword);
            modifiers.push(self.finish_node(start, NodeData::Modifier { keyword }));
        }
        (modifiers, flags)
    }

    // =========================================================================
    // Parse Methods - Names and parameters
    // =========================================================================

    /// Parse a declared name. The name slot expects a fresh word, so its
    /// sentinels carry the `Literal` category.
    pub(crate) fn parse_declared_name(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::Identifier) && !self.is_invalid_character() {
            return self.parse_identifier();
        }
        self.missing_or_wrong("Identifier expected.", Some(ExpectedKind::Literal))
    }

    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let token = self.next_token();
        let name = token.text().unwrap_or_default().to_string();
        self.finish_node(start, NodeData::Identifier { name })
    }

    /// `( params )` of a function declaration; the cursor is on `(`.
    pub(crate) fn parse_parameter_list(&mut self) -> ArgumentList {
        let pos = self.token_pos();
        self.next_token();
        let mut items = Vec::new();

        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
            && !self.is_token(SyntaxKind::OpenBraceToken)
            && !self.is_token(SyntaxKind::SemicolonToken)
        {
            let before = self.token_pos();
            items.push(self.parse_parameter());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                if self.token_pos() == before {
                    items.push(self.create_wrong("Parameter expected.", Some(ExpectedKind::Type)));
                }
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);

        ArgumentList {
            pos,
            end: self.prev_end,
            items,
        }
    }

    fn parse_parameter(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            return self.finish_node(start, NodeData::Ellipsis);
        }
        // Parameter modifiers such as `varargs` carry no meaning here.
        while token_is_modifier(self.token()) {
            self.next_token();
        }
        let ty = self.parse_type();
        let name = self.parse_declared_name();
        let variadic = self.parse_optional(SyntaxKind::DotDotDotToken);
        self.finish_node(start, NodeData::Parameter { ty, name, variadic })
    }

    /// `foreach`/`catch` binding: `type name` or a bare `name`.
    pub(crate) fn parse_binding(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let typed = token_is_type_keyword(self.token())
            || (self.is_token(SyntaxKind::Identifier)
                && matches!(
                    self.peek(),
                    SyntaxKind::Identifier | SyntaxKind::OpenBracketToken
                ));
        let ty = if typed {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        let name = self.parse_declared_name();
        self.finish_node(start, NodeData::Binding { ty, name })
    }
}
