use tree_sitter::Node;

/// Node kinds of the C grammar that the lint rules inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
	TranslationUnit,
	FunctionDefinition,
	Declaration,
	StorageClassSpecifier,
	FunctionDeclarator,
	ParameterList,
	ParameterDeclaration,
	PointerDeclarator,
	InitDeclarator,
	Identifier,
	FieldIdentifier,
	TypeIdentifier,
	PrimitiveType,
	CallExpression,
	ArgumentList,
	CastExpression,
	CompoundStatement,
	Comment,
	StructSpecifier,
	FieldDeclarationList,
	FieldDeclaration,
	PreprocIf,
	PreprocIfdef,
	PreprocElif,
	PreprocElse,
}

impl NodeKind {
	/// Grammar name of the kind.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::TranslationUnit => "translation_unit",
			Self::FunctionDefinition => "function_definition",
			Self::Declaration => "declaration",
			Self::StorageClassSpecifier => "storage_class_specifier",
			Self::FunctionDeclarator => "function_declarator",
			Self::ParameterList => "parameter_list",
			Self::ParameterDeclaration => "parameter_declaration",
			Self::PointerDeclarator => "pointer_declarator",
			Self::InitDeclarator => "init_declarator",
			Self::Identifier => "identifier",
			Self::FieldIdentifier => "field_identifier",
			Self::TypeIdentifier => "type_identifier",
			Self::PrimitiveType => "primitive_type",
			Self::CallExpression => "call_expression",
			Self::ArgumentList => "argument_list",
			Self::CastExpression => "cast_expression",
			Self::CompoundStatement => "compound_statement",
			Self::Comment => "comment",
			Self::StructSpecifier => "struct_specifier",
			Self::FieldDeclarationList => "field_declaration_list",
			Self::FieldDeclaration => "field_declaration",
			Self::PreprocIf => "preproc_if",
			Self::PreprocIfdef => "preproc_ifdef",
			Self::PreprocElif => "preproc_elif",
			Self::PreprocElse => "preproc_else",
		}
	}

	/// Returns true if `node` is of this kind.
	#[inline]
	pub fn matches(self, node: &Node<'_>) -> bool {
		node.kind() == self.as_str()
	}

	/// Conditional compilation blocks, which hold top-level items of a header.
	pub fn is_preproc_block(node: &Node<'_>) -> bool {
		[Self::PreprocIf, Self::PreprocIfdef, Self::PreprocElif, Self::PreprocElse]
			.iter()
			.any(|kind| kind.matches(node))
	}
}

/// Field names used for child lookup.
pub mod field {
	pub const ARGUMENTS: &str = "arguments";
	pub const BODY: &str = "body";
	pub const DECLARATOR: &str = "declarator";
	pub const FUNCTION: &str = "function";
	pub const PARAMETERS: &str = "parameters";
	pub const TYPE: &str = "type";
	pub const VALUE: &str = "value";
}
