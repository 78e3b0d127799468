//! Parser state - source files, declarations and statements.

use super::base::NodeIndex;
use super::node::{ExpectedKind, LiteralValue, ModifierFlags, NodeData};
use super::state::ParserState;
use mudz_scanner::{SyntaxKind, token_is_modifier, token_is_type_keyword};
use tracing::{debug, instrument};

impl ParserState {
    // =========================================================================
    // Parse Methods - Source file
    // =========================================================================

    /// Parse the whole source text into a `SourceFile` node.
    #[instrument(level = "debug", skip(self), fields(file = %self.file_name))]
    pub fn parse_source_file(&mut self) -> NodeIndex {
        let mut statements = Vec::new();

        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let pos_before = self.token_pos();
            let statement = self.parse_top_level_element();
            statements.push(statement);

            // Safety: if position didn't advance, wrap the current token in a
            // Wrong node so the loop always terminates.
            if self.token_pos() == pos_before && !self.is_token(SyntaxKind::EndOfFileToken) {
                statements.push(self.create_wrong("Declaration or statement expected.", None));
            }
        }

        let file_name = self.file_name.clone();
        let end = self.source_text().len() as u32;
        let root = self.arena.add_node(
            0,
            end,
            NodeData::SourceFile {
                file_name,
                statements,
            },
        );
        debug!(
            nodes = self.arena.len(),
            diagnostics = self.parse_diagnostics.len(),
            "parsed source file"
        );
        root
    }

    fn parse_top_level_element(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::HashIncludeKeyword => self.parse_include_directive(),
            SyntaxKind::InheritKeyword => self.parse_inherit(),
            _ => self.parse_statement(),
        }
    }

    /// `#include "file"` or `#include <file>`.
    fn parse_include_directive(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();

        let (path, system) = match self.token() {
            SyntaxKind::StringLiteral => (self.parse_string_literals(), false),
            SyntaxKind::LessThanToken => (self.parse_system_include_path(), true),
            _ => (
                self.missing_or_wrong("File name expected.", Some(ExpectedKind::Literal)),
                false,
            ),
        };
        self.finish_node(start, NodeData::IncludeDirective { path, system })
    }

    /// `<dir/file.h>` read as raw source text up to `>` on the same line.
    fn parse_system_include_path(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let open_end = self.token_end();
        self.next_token();

        let line_end = self.source_text()[open_end as usize..]
            .find('\n')
            .map_or(self.source_text().len(), |i| open_end as usize + i) as u32;

        while !self.is_token(SyntaxKind::GreaterThanToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
            && self.token_pos() < line_end
        {
            self.next_token();
        }
        let text_end = if self.is_token(SyntaxKind::GreaterThanToken) {
            let close = self.token_pos();
            self.next_token();
            close
        } else {
            self.error_at_current("'>' expected.".to_string());
            self.prev_end.max(open_end)
        };

        let text = self.source_text()[open_end as usize..text_end as usize]
            .trim()
            .to_string();
        self.finish_node(
            start,
            NodeData::Literal {
                value: LiteralValue::String(text),
            },
        )
    }

    /// `inherit "path";`
    fn parse_inherit(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let path = if self.is_token(SyntaxKind::StringLiteral) {
            self.parse_string_literals()
        } else {
            self.missing_or_wrong("Inherited file name expected.", Some(ExpectedKind::Literal))
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        self.finish_node(start, NodeData::Inherit { path })
    }

    // =========================================================================
    // Parse Methods - Declarations
    // =========================================================================

    /// Whether the current token begins a declaration rather than an
    /// expression: a modifier, a type keyword, `class`, or a class-typed
    /// declaration (`Name name` / `Name[] name`).
    pub(crate) fn is_start_of_declaration(&mut self) -> bool {
        let kind = self.token();
        if token_is_modifier(kind) || kind == SyntaxKind::ClassKeyword {
            return true;
        }
        if token_is_type_keyword(kind) {
            return true;
        }
        if kind != SyntaxKind::Identifier {
            return false;
        }
        match self.peek() {
            SyntaxKind::Identifier => true,
            SyntaxKind::OpenBracketToken => self.look_ahead(|p| {
                p.next_token();
                p.next_token();
                p.is_token(SyntaxKind::CloseBracketToken)
            }),
            _ => false,
        }
    }

    pub(crate) fn parse_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let (modifiers, flags) = self.parse_modifiers();

        if self.is_token(SyntaxKind::ClassKeyword) {
            return self.parse_class_declaration(start, modifiers, flags);
        }

        let ty = self.parse_type();
        let name = self.parse_declared_name();

        if self.is_token(SyntaxKind::OpenParenToken) {
            let parameters = self.parse_parameter_list();
            let body = match self.token() {
                SyntaxKind::OpenBraceToken => self.parse_block(),
                _ => {
                    self.parse_expected(SyntaxKind::SemicolonToken);
                    NodeIndex::NONE
                }
            };
            return self.finish_node(
                start,
                NodeData::FunctionDeclaration {
                    modifiers,
                    flags,
                    return_type: ty,
                    name,
                    parameters,
                    body,
                },
            );
        }

        let mut declarators = vec![self.finish_declarator(name)];
        while self.parse_optional(SyntaxKind::CommaToken) {
            let name = self.parse_declared_name();
            declarators.push(self.finish_declarator(name));
        }
        self.parse_expected(SyntaxKind::SemicolonToken);
        self.finish_node(
            start,
            NodeData::VariableDeclaration {
                modifiers,
                flags,
                ty,
                declarators,
            },
        )
    }

    /// Wrap a parsed name (and an optional `= initializer`) in a declarator.
    fn finish_declarator(&mut self, name: NodeIndex) -> NodeIndex {
        let start = self.arena.get(name).map_or(self.token_pos(), |n| n.pos);
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_expression()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(start, NodeData::VariableDeclarator { name, initializer })
    }

    fn parse_class_declaration(
        &mut self,
        start: u32,
        modifiers: Vec<NodeIndex>,
        flags: ModifierFlags,
    ) -> NodeIndex {
        self.next_token(); // class
        let name = self.parse_declared_name();
        let mut members = Vec::new();

        if self.parse_expected(SyntaxKind::OpenBraceToken) {
            while !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                if self.is_start_of_declaration() {
                    members.push(self.parse_declaration());
                } else if self.is_token(SyntaxKind::SemicolonToken) {
                    self.next_token();
                } else {
                    members.push(self.create_wrong("Member declaration expected.", None));
                }
            }
            self.parse_expected(SyntaxKind::CloseBraceToken);
        }
        self.parse_optional(SyntaxKind::SemicolonToken);

        self.finish_node(
            start,
            NodeData::ClassDeclaration {
                modifiers,
                flags,
                name,
                members,
            },
        )
    }

    // =========================================================================
    // Parse Methods - Statements
    // =========================================================================

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        self.nested(|p| p.parse_statement_worker())
    }

    fn parse_statement_worker(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                self.next_token();
                self.finish_node(start, NodeData::EmptyStatement)
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ForeachKeyword => self.parse_foreach_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::ReturnKeyword => {
                self.next_token();
                let expression = if self.is_token(SyntaxKind::SemicolonToken)
                    || self.is_token(SyntaxKind::CloseBraceToken)
                {
                    NodeIndex::NONE
                } else {
                    self.parse_expression()
                };
                self.parse_expected(SyntaxKind::SemicolonToken);
                self.finish_node(start, NodeData::Return { expression })
            }
            SyntaxKind::BreakKeyword => {
                self.next_token();
                self.parse_expected(SyntaxKind::SemicolonToken);
                self.finish_node(start, NodeData::Break)
            }
            SyntaxKind::ContinueKeyword => {
                self.next_token();
                self.parse_expected(SyntaxKind::SemicolonToken);
                self.finish_node(start, NodeData::Continue)
            }
            _ => self.parse_declaration_or_expression_statement(),
        }
    }

    fn parse_declaration_or_expression_statement(&mut self) -> NodeIndex {
        if self.is_invalid_character() {
            return self.create_wrong("Invalid character.", None);
        }
        if self.is_start_of_declaration() {
            return self.parse_declaration();
        }
        if !self.is_start_of_expression() {
            return self.create_wrong("Declaration or statement expected.", None);
        }
        let start = self.token_pos();
        let expression = self.parse_expression();
        self.parse_expected(SyntaxKind::SemicolonToken);
        self.finish_node(start, NodeData::ExpressionStatement { expression })
    }

    /// `{ statements }`. A block left open at end of input extends to the end
    /// of the source, so the text being typed still lies inside it.
    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_block_statements(&[SyntaxKind::CloseBraceToken]);
        let closed = self.parse_expected(SyntaxKind::CloseBraceToken);
        let block = self.finish_node(start, NodeData::Block { statements });
        if !closed && self.is_token(SyntaxKind::EndOfFileToken) {
            let end = self.source_text().len() as u32;
            self.arena.extend_end(block, end);
        }
        block
    }

    /// A block where one is mandatory; without `{` nothing is consumed.
    fn parse_required_block(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            self.create_missing("'{' expected.", None)
        }
    }

    /// Statements up to one of `terminators` (not consumed) or end of input.
    fn parse_block_statements(&mut self, terminators: &[SyntaxKind]) -> Vec<NodeIndex> {
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) && !terminators.contains(&self.token()) {
            let pos_before = self.token_pos();
            statements.push(self.parse_statement());
            if self.token_pos() == pos_before
                && !self.is_token(SyntaxKind::EndOfFileToken)
                && !terminators.contains(&self.token())
            {
                statements.push(self.create_wrong("Declaration or statement expected.", None));
            }
        }
        statements
    }

    /// `( expression )` around a statement condition.
    fn parse_condition(&mut self) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        condition
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let condition = self.parse_condition();
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(
            start,
            NodeData::If {
                condition,
                then_statement,
                else_statement,
            },
        )
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let condition = self.parse_condition();
        let body = self.parse_statement();
        self.finish_node(start, NodeData::While { condition, body })
    }

    fn parse_do_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let body = self.parse_statement();
        let condition = if self.parse_expected(SyntaxKind::WhileKeyword) {
            self.parse_condition()
        } else {
            NodeIndex::NONE
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        self.finish_node(start, NodeData::Do { body, condition })
    }

    /// `for (init; condition; step) body`
    fn parse_for_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);

        let initializer = if self.parse_optional(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else if self.is_start_of_declaration() {
            // The declaration consumes its own `;`.
            self.parse_declaration()
        } else {
            let expression = self.parse_expression();
            self.parse_expected(SyntaxKind::SemicolonToken);
            expression
        };

        let condition = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::SemicolonToken);

        let incrementor = if self.is_token(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::CloseParenToken);

        let body = self.parse_statement();
        self.finish_node(
            start,
            NodeData::For {
                initializer,
                condition,
                incrementor,
                body,
            },
        )
    }

    /// `foreach (binding, binding in iterable) body`
    fn parse_foreach_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);

        let mut bindings = vec![self.parse_binding()];
        while self.parse_optional(SyntaxKind::CommaToken) {
            bindings.push(self.parse_binding());
        }
        let iterable = if self.parse_expected(SyntaxKind::InKeyword) {
            self.parse_expression()
        } else {
            NodeIndex::NONE
        };
        self.parse_expected(SyntaxKind::CloseParenToken);

        let body = self.parse_statement();
        self.finish_node(
            start,
            NodeData::Foreach {
                bindings,
                iterable,
                body,
            },
        )
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_condition();
        let mut clauses = Vec::new();

        if self.parse_expected(SyntaxKind::OpenBraceToken) {
            while !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                match self.token() {
                    SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword => {
                        clauses.push(self.parse_case_clause());
                    }
                    _ => {
                        // Statements before the first label stay in the tree.
                        self.error_at_current("'case' or 'default' expected.".to_string());
                        let pos_before = self.token_pos();
                        clauses.push(self.parse_statement());
                        if self.token_pos() == pos_before {
                            clauses.push(self.create_wrong("Statement expected.", None));
                        }
                    }
                }
            }
            self.parse_expected(SyntaxKind::CloseBraceToken);
        }

        self.finish_node(
            start,
            NodeData::Switch {
                expression,
                clauses,
            },
        )
    }

    /// `case a: ...`, `case a..b: ...` or `default: ...`
    fn parse_case_clause(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let is_default = self.next_token().kind == SyntaxKind::DefaultKeyword;

        let mut label = NodeIndex::NONE;
        let mut range_end = NodeIndex::NONE;
        if !is_default {
            label = self.parse_expression();
            if self.parse_optional(SyntaxKind::DotDotToken) {
                range_end = self.parse_expression();
            }
        }
        self.parse_expected(SyntaxKind::ColonToken);

        let statements = self.parse_block_statements(&[
            SyntaxKind::CaseKeyword,
            SyntaxKind::DefaultKeyword,
            SyntaxKind::CloseBraceToken,
        ]);
        self.finish_node(
            start,
            NodeData::CaseClause {
                label,
                range_end,
                statements,
            },
        )
    }

    /// `try { } catch (binding) { }`
    fn parse_try_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let try_block = self.parse_required_block();

        let mut catch_binding = NodeIndex::NONE;
        let mut catch_block = NodeIndex::NONE;
        if self.parse_optional(SyntaxKind::CatchKeyword) {
            if self.parse_optional(SyntaxKind::OpenParenToken) {
                if !self.is_token(SyntaxKind::CloseParenToken) {
                    catch_binding = self.parse_binding();
                }
                self.parse_expected(SyntaxKind::CloseParenToken);
            }
            catch_block = self.parse_required_block();
        }

        self.finish_node(
            start,
            NodeData::Try {
                try_block,
                catch_binding,
                catch_block,
            },
        )
    }
}
