//! Parse-tree dumps as flang prints them with `-fdebug-dump-parse-tree-no-sema`
//!
//! Each constant is one `*_ptree` file. Library and caller dumps are kept
//! separate so the same sources serve single-file and cross-file tests.

/// Generic `compute` with real, integer and logical specifics
pub const BASIC_LIB: &str = "\
======================== Flang: parse tree dump ========================
Program -> ProgramUnit -> Module
| ModuleStmt -> Name = 'interface_basic_mod'
| SpecificationPart
| | ImplicitPart ->
| | DeclarationConstruct -> SpecificationConstruct -> InterfaceBlock
| | | InterfaceStmt -> GenericSpec -> Name = 'compute'
| | | InterfaceSpecification -> ProcedureStmt
| | | | Kind = ModuleProcedure
| | | | Name = 'compute_real'
| | | | Name = 'compute_int'
| | | | Name = 'compute_logical'
| | | EndInterfaceStmt ->
| ModuleSubprogramPart
| | ContainsStmt
| | ModuleSubprogram -> SubroutineSubprogram
| | | SubroutineStmt
| | | | Name = 'compute_real'
| | | | DummyArg -> Name = 'x'
| | | | DummyArg -> Name = 'n'
| | | SpecificationPart
| | | | ImplicitPart ->
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Real ->
| | | | | AttrSpec -> IntentSpec -> Intent = In
| | | | | EntityDecl
| | | | | | Name = 'x'
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> IntegerTypeSpec ->
| | | | | AttrSpec -> IntentSpec -> Intent = In
| | | | | EntityDecl
| | | | | | Name = 'n'
| | | ExecutionPart -> Block
| | | EndSubroutineStmt ->
| | ModuleSubprogram -> SubroutineSubprogram
| | | SubroutineStmt
| | | | Name = 'compute_int'
| | | | DummyArg -> Name = 'x'
| | | | DummyArg -> Name = 'n'
| | | SpecificationPart
| | | | ImplicitPart ->
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> IntegerTypeSpec ->
| | | | | AttrSpec -> IntentSpec -> Intent = In
| | | | | EntityDecl
| | | | | | Name = 'x'
| | | | | EntityDecl
| | | | | | Name = 'n'
| | | ExecutionPart -> Block
| | | EndSubroutineStmt ->
| | ModuleSubprogram -> SubroutineSubprogram
| | | SubroutineStmt
| | | | Name = 'compute_logical'
| | | | DummyArg -> Name = 'x'
| | | | DummyArg -> Name = 'n'
| | | SpecificationPart
| | | | ImplicitPart ->
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Logical ->
| | | | | AttrSpec -> IntentSpec -> Intent = In
| | | | | EntityDecl
| | | | | | Name = 'x'
| | | | | EntityDecl
| | | | | | Name = 'n'
| | | ExecutionPart -> Block
| | | EndSubroutineStmt ->
| EndModuleStmt ->
";

/// `call compute(r, 1)`, `call compute(i, 2)`, `call compute(flag, .true.)`
pub const BASIC_CALLER: &str = "\
======================== Flang: parse tree dump ========================
Program -> ProgramUnit -> Module
| ModuleStmt -> Name = 'caller_basic_mod'
| SpecificationPart
| | UseStmt
| | | Name = 'interface_basic_mod'
| | ImplicitPart ->
| ModuleSubprogramPart
| | ContainsStmt
| | ModuleSubprogram -> SubroutineSubprogram
| | | SubroutineStmt
| | | | Name = 'test_calls'
| | | SpecificationPart
| | | | ImplicitPart ->
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Real ->
| | | | | EntityDecl
| | | | | | Name = 'r'
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> IntegerTypeSpec ->
| | | | | EntityDecl
| | | | | | Name = 'i'
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Logical ->
| | | | | EntityDecl
| | | | | | Name = 'flag'
| | | ExecutionPart -> Block
| | | | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL compute(r,1_4)'
| | | | | Call
| | | | | | ProcedureDesignator -> Name = 'compute'
| | | | | | ActualArgSpec
| | | | | | | ActualArg -> Expr = 'r'
| | | | | | | | Designator -> DataRef -> Name = 'r'
| | | | | | ActualArgSpec
| | | | | | | ActualArg -> Expr = '1_4'
| | | | | | | | LiteralConstant -> IntLiteralConstant = '1'
| | | | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL compute(i,2_4)'
| | | | | Call
| | | | | | ProcedureDesignator -> Name = 'compute'
| | | | | | ActualArgSpec
| | | | | | | ActualArg -> Expr = 'i'
| | | | | | | | Designator -> DataRef -> Name = 'i'
| | | | | | ActualArgSpec
| | | | | | | ActualArg -> Expr = '2_4'
| | | | | | | | LiteralConstant -> IntLiteralConstant = '2'
| | | | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL compute(flag,.true._4)'
| | | | | Call
| | | | | | ProcedureDesignator -> Name = 'compute'
| | | | | | ActualArgSpec
| | | | | | | ActualArg -> Expr = 'flag'
| | | | | | | | Designator -> DataRef -> Name = 'flag'
| | | | | | ActualArgSpec
| | | | | | | ActualArg -> Expr = '.true._4'
| | | | | | | | LiteralConstant -> LogicalLiteralConstant
| | | | | | | | | Bool = 'true'
| | | EndSubroutineStmt ->
| EndModuleStmt ->
";

/// Rank-only overloads, including assumed-shape dimensions with lower bounds
pub const RANK_LIB: &str = "\
======================== Flang: parse tree dump ========================
Program -> ProgramUnit -> Module
| ModuleStmt -> Name = 'rank_mod'
| SpecificationPart
| | ImplicitPart ->
| | DeclarationConstruct -> SpecificationConstruct -> InterfaceBlock
| | | InterfaceStmt -> GenericSpec -> Name = 'process'
| | | InterfaceSpecification -> ProcedureStmt
| | | | Kind = ModuleProcedure
| | | | Name = 'process_1d'
| | | | Name = 'process_2d'
| | | | Name = 'process_3d'
| | | EndInterfaceStmt ->
| ModuleSubprogramPart
| | ContainsStmt
| | ModuleSubprogram -> SubroutineSubprogram
| | | SubroutineStmt
| | | | Name = 'process_1d'
| | | | DummyArg -> Name = 'a'
| | | SpecificationPart
| | | | ImplicitPart ->
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Real ->
| | | | | AttrSpec -> IntentSpec -> Intent = InOut
| | | | | AttrSpec -> ArraySpec -> AssumedShapeSpec ->
| | | | | EntityDecl
| | | | | | Name = 'a'
| | | ExecutionPart -> Block
| | | EndSubroutineStmt ->
| | ModuleSubprogram -> SubroutineSubprogram
| | | SubroutineStmt
| | | | Name = 'process_2d'
| | | | DummyArg -> Name = 'a'
| | | SpecificationPart
| | | | ImplicitPart ->
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Real ->
| | | | | AttrSpec -> IntentSpec -> Intent = InOut
| | | | | EntityDecl
| | | | | | Name = 'a'
| | | | | | ArraySpec
| | | | | | | AssumedShapeSpec -> SpecificationExpr -> Scalar -> Integer -> Expr = '0_4'
| | | | | | | | LiteralConstant -> IntLiteralConstant = '0'
| | | | | | | AssumedShapeSpec -> SpecificationExpr -> Scalar -> Integer -> Expr = '1_4'
| | | | | | | | LiteralConstant -> IntLiteralConstant = '1'
| | | ExecutionPart -> Block
| | | EndSubroutineStmt ->
| | ModuleSubprogram -> SubroutineSubprogram
| | | SubroutineStmt
| | | | Name = 'process_3d'
| | | | DummyArg -> Name = 'a'
| | | SpecificationPart
| | | | ImplicitPart ->
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Real ->
| | | | | AttrSpec -> IntentSpec -> Intent = InOut
| | | | | AttrSpec -> ArraySpec
| | | | | | AssumedShapeSpec ->
| | | | | | AssumedShapeSpec ->
| | | | | | AssumedShapeSpec ->
| | | | | EntityDecl
| | | | | | Name = 'a'
| | | ExecutionPart -> Block
| | | EndSubroutineStmt ->
| EndModuleStmt ->
";

/// Whole arrays of rank 1 to 3 plus a section and a vector-subscripted element
pub const RANK_CALLER: &str = "\
======================== Flang: parse tree dump ========================
Program -> ProgramUnit -> MainProgram
| ProgramStmt -> Name = 'rank_driver'
| SpecificationPart
| | UseStmt
| | | Name = 'rank_mod'
| | ImplicitPart ->
| | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Real ->
| | | EntityDecl
| | | | Name = 'a1'
| | | | ArraySpec -> ExplicitShapeSpec -> SpecificationExpr -> Scalar -> Integer -> Expr = '10_4'
| | | EntityDecl
| | | | Name = 'a2'
| | | | ArraySpec
| | | | | ExplicitShapeSpec -> SpecificationExpr -> Scalar -> Integer -> Expr = '10_4'
| | | | | ExplicitShapeSpec -> SpecificationExpr -> Scalar -> Integer -> Expr = '10_4'
| | | EntityDecl
| | | | Name = 'a3'
| | | | ArraySpec
| | | | | ExplicitShapeSpec -> SpecificationExpr -> Scalar -> Integer -> Expr = '5_4'
| | | | | ExplicitShapeSpec -> SpecificationExpr -> Scalar -> Integer -> Expr = '5_4'
| | | | | ExplicitShapeSpec -> SpecificationExpr -> Scalar -> Integer -> Expr = '5_4'
| | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | DeclarationTypeSpec -> IntrinsicTypeSpec -> IntegerTypeSpec ->
| | | EntityDecl
| | | | Name = 'idx'
| | | | ArraySpec -> ExplicitShapeSpec -> SpecificationExpr -> Scalar -> Integer -> Expr = '3_4'
| ExecutionPart -> Block
| | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL process(a1)'
| | | Call
| | | | ProcedureDesignator -> Name = 'process'
| | | | ActualArgSpec -> ActualArg -> Expr = 'a1'
| | | | | Designator -> DataRef -> Name = 'a1'
| | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL process(a2)'
| | | Call
| | | | ProcedureDesignator -> Name = 'process'
| | | | ActualArgSpec -> ActualArg -> Expr = 'a2'
| | | | | Designator -> DataRef -> Name = 'a2'
| | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL process(a3)'
| | | Call
| | | | ProcedureDesignator -> Name = 'process'
| | | | ActualArgSpec -> ActualArg -> Expr = 'a3'
| | | | | Designator -> DataRef -> Name = 'a3'
| | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL process(a3(1_4,:,:))'
| | | Call
| | | | ProcedureDesignator -> Name = 'process'
| | | | ActualArgSpec -> ActualArg -> Expr = 'a3(1_4,:,:)'
| | | | | Designator -> DataRef -> ArrayElement
| | | | | | DataRef -> Name = 'a3'
| | | | | | SectionSubscript -> Integer -> Expr = '1_4'
| | | | | | | LiteralConstant -> IntLiteralConstant = '1'
| | | | | | SectionSubscript -> SubscriptTriplet
| | | | | | SectionSubscript -> SubscriptTriplet
| | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL process(a2(idx,2_4))'
| | | Call
| | | | ProcedureDesignator -> Name = 'process'
| | | | ActualArgSpec -> ActualArg -> Expr = 'a2(idx,2_4)'
| | | | | FunctionReference -> Call
| | | | | | ProcedureDesignator -> Name = 'a2'
| | | | | | ActualArgSpec -> ActualArg -> Expr = 'idx'
| | | | | | | Designator -> DataRef -> Name = 'idx'
| | | | | | ActualArgSpec -> ActualArg -> Expr = '2_4'
| | | | | | | LiteralConstant -> IntLiteralConstant = '2'
| EndProgramStmt ->
";

/// Keyword reordering, optional arguments, structure components and
/// function references in one module
pub const SOLVER: &str = "\
======================== Flang: parse tree dump ========================
Program -> ProgramUnit -> Module
| ModuleStmt -> Name = 'solver_mod'
| SpecificationPart
| | ImplicitPart ->
| | DeclarationConstruct -> SpecificationConstruct -> DerivedTypeDef
| | | DerivedTypeStmt
| | | | Name = 'config_t'
| | | ComponentDefStmt -> DataComponentDefStmt
| | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> IntegerTypeSpec ->
| | | | ComponentOrFill -> ComponentDecl
| | | | | Name = 'count'
| | | ComponentDefStmt -> DataComponentDefStmt
| | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Real ->
| | | | ComponentAttrSpec -> ComponentArraySpec -> DeferredShapeSpecList -> int = '1'
| | | | ComponentOrFill -> ComponentDecl
| | | | | Name = 'weights'
| | | EndTypeStmt ->
| | DeclarationConstruct -> SpecificationConstruct -> InterfaceBlock
| | | InterfaceStmt -> GenericSpec -> Name = 'transform'
| | | InterfaceSpecification -> ProcedureStmt
| | | | Kind = ModuleProcedure
| | | | Name = 'transform_scale'
| | | | Name = 'transform_shift'
| | | EndInterfaceStmt ->
| | DeclarationConstruct -> SpecificationConstruct -> InterfaceBlock
| | | InterfaceStmt -> GenericSpec -> Name = 'solve'
| | | InterfaceSpecification -> ProcedureStmt
| | | | Kind = ModuleProcedure
| | | | Name = 'solve_basic'
| | | | Name = 'solve_full'
| | | EndInterfaceStmt ->
| | DeclarationConstruct -> SpecificationConstruct -> InterfaceBlock
| | | InterfaceStmt -> GenericSpec -> Name = 'apply'
| | | InterfaceSpecification -> ProcedureStmt
| | | | Kind = ModuleProcedure
| | | | Name = 'apply_int'
| | | | Name = 'apply_real'
| | | EndInterfaceStmt ->
| ModuleSubprogramPart
| | ContainsStmt
| | ModuleSubprogram -> SubroutineSubprogram
| | | SubroutineStmt
| | | | Name = 'transform_scale'
| | | | DummyArg -> Name = 'data'
| | | | DummyArg -> Name = 'scale'
| | | | DummyArg -> Name = 'offset'
| | | SpecificationPart
| | | | ImplicitPart ->
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Real ->
| | | | | AttrSpec -> IntentSpec -> Intent = InOut
| | | | | AttrSpec -> ArraySpec -> AssumedShapeSpec ->
| | | | | EntityDecl
| | | | | | Name = 'data'
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Real ->
| | | | | AttrSpec -> IntentSpec -> Intent = In
| | | | | EntityDecl
| | | | | | Name = 'scale'
| | | | | EntityDecl
| | | | | | Name = 'offset'
| | | ExecutionPart -> Block
| | | EndSubroutineStmt ->
| | ModuleSubprogram -> SubroutineSubprogram
| | | SubroutineStmt
| | | | Name = 'transform_shift'
| | | | DummyArg -> Name = 'data'
| | | | DummyArg -> Name = 'shift'
| | | SpecificationPart
| | | | ImplicitPart ->
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Real ->
| | | | | AttrSpec -> IntentSpec -> Intent = InOut
| | | | | AttrSpec -> ArraySpec -> AssumedShapeSpec ->
| | | | | EntityDecl
| | | | | | Name = 'data'
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> IntegerTypeSpec ->
| | | | | AttrSpec -> IntentSpec -> Intent = In
| | | | | EntityDecl
| | | | | | Name = 'shift'
| | | ExecutionPart -> Block
| | | EndSubroutineStmt ->
| | ModuleSubprogram -> SubroutineSubprogram
| | | SubroutineStmt
| | | | Name = 'solve_basic'
| | | | DummyArg -> Name = 'a'
| | | | DummyArg -> Name = 'b'
| | | SpecificationPart
| | | | ImplicitPart ->
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Real ->
| | | | | EntityDecl
| | | | | | Name = 'a'
| | | | | EntityDecl
| | | | | | Name = 'b'
| | | ExecutionPart -> Block
| | | EndSubroutineStmt ->
| | ModuleSubprogram -> SubroutineSubprogram
| | | SubroutineStmt
| | | | Name = 'solve_full'
| | | | DummyArg -> Name = 'a'
| | | | DummyArg -> Name = 'b'
| | | | DummyArg -> Name = 'tol'
| | | | DummyArg -> Name = 'debug'
| | | SpecificationPart
| | | | ImplicitPart ->
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Real ->
| | | | | EntityDecl
| | | | | | Name = 'a'
| | | | | EntityDecl
| | | | | | Name = 'b'
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Real ->
| | | | | AttrSpec -> Optional
| | | | | EntityDecl
| | | | | | Name = 'tol'
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Logical ->
| | | | | AttrSpec -> Optional
| | | | | EntityDecl
| | | | | | Name = 'debug'
| | | ExecutionPart -> Block
| | | EndSubroutineStmt ->
| | ModuleSubprogram -> SubroutineSubprogram
| | | SubroutineStmt
| | | | Name = 'apply_int'
| | | | DummyArg -> Name = 'x'
| | | SpecificationPart
| | | | ImplicitPart ->
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> IntegerTypeSpec ->
| | | | | EntityDecl
| | | | | | Name = 'x'
| | | ExecutionPart -> Block
| | | EndSubroutineStmt ->
| | ModuleSubprogram -> SubroutineSubprogram
| | | SubroutineStmt
| | | | Name = 'apply_real'
| | | | DummyArg -> Name = 'x'
| | | SpecificationPart
| | | | ImplicitPart ->
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Real ->
| | | | | EntityDecl
| | | | | | Name = 'x'
| | | ExecutionPart -> Block
| | | EndSubroutineStmt ->
| | ModuleSubprogram -> FunctionSubprogram
| | | FunctionStmt
| | | | PrefixSpec -> DeclarationTypeSpec -> IntrinsicTypeSpec -> IntegerTypeSpec ->
| | | | Name = 'twice'
| | | | Name = 'k'
| | | SpecificationPart
| | | | ImplicitPart ->
| | | | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | | | DeclarationTypeSpec -> IntrinsicTypeSpec -> IntegerTypeSpec ->
| | | | | AttrSpec -> IntentSpec -> Intent = In
| | | | | EntityDecl
| | | | | | Name = 'k'
| | | ExecutionPart -> Block
| | | EndFunctionStmt ->
| EndModuleStmt ->
";

/// Calls into `solver_mod`; line numbers are stable so tests can name sites
pub const SOLVER_CALLER: &str = "\
======================== Flang: parse tree dump ========================
Program -> ProgramUnit -> MainProgram
| ProgramStmt -> Name = 'solver_driver'
| SpecificationPart
| | UseStmt
| | | Name = 'solver_mod'
| | ImplicitPart ->
| | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | DeclarationTypeSpec -> IntrinsicTypeSpec -> Real ->
| | | EntityDecl
| | | | Name = 'd'
| | | | ArraySpec -> ExplicitShapeSpec -> SpecificationExpr -> Scalar -> Integer -> Expr = '100_4'
| | | EntityDecl
| | | | Name = 'vals'
| | | | ArraySpec -> ExplicitShapeSpec -> SpecificationExpr -> Scalar -> Integer -> Expr = '10_4'
| | | EntityDecl
| | | | Name = 'x'
| | | EntityDecl
| | | | Name = 'y'
| | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | DeclarationTypeSpec -> IntrinsicTypeSpec -> IntegerTypeSpec ->
| | | EntityDecl
| | | | Name = 'i'
| | DeclarationConstruct -> SpecificationConstruct -> TypeDeclarationStmt
| | | DeclarationTypeSpec -> Type -> DerivedTypeSpec -> Name = 'config_t'
| | | EntityDecl
| | | | Name = 'cfg'
| ExecutionPart -> Block
| | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL transform(d,offset=1._4,scale=2._4)'
| | | Call
| | | | ProcedureDesignator -> Name = 'transform'
| | | | ActualArgSpec -> ActualArg -> Expr = 'd'
| | | | | Designator -> DataRef -> Name = 'd'
| | | | ActualArgSpec
| | | | | Keyword -> Name = 'offset'
| | | | | ActualArg -> Expr = '1._4'
| | | | | | LiteralConstant -> RealLiteralConstant
| | | | | | | Real = '1.'
| | | | ActualArgSpec
| | | | | Keyword -> Name = 'scale'
| | | | | ActualArg -> Expr = '2._4'
| | | | | | LiteralConstant -> RealLiteralConstant
| | | | | | | Real = '2.'
| | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL transform(d,2._4,1._4)'
| | | Call
| | | | ProcedureDesignator -> Name = 'transform'
| | | | ActualArgSpec -> ActualArg -> Expr = 'd'
| | | | | Designator -> DataRef -> Name = 'd'
| | | | ActualArgSpec -> ActualArg -> Expr = '2._4'
| | | | | LiteralConstant -> RealLiteralConstant
| | | | | | Real = '2.'
| | | | ActualArgSpec -> ActualArg -> Expr = '1._4'
| | | | | LiteralConstant -> RealLiteralConstant
| | | | | | Real = '1.'
| | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL transform(d,shift=3_4)'
| | | Call
| | | | ProcedureDesignator -> Name = 'transform'
| | | | ActualArgSpec -> ActualArg -> Expr = 'd'
| | | | | Designator -> DataRef -> Name = 'd'
| | | | ActualArgSpec
| | | | | Keyword -> Name = 'shift'
| | | | | ActualArg -> Expr = '3_4'
| | | | | | LiteralConstant -> IntLiteralConstant = '3'
| | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL solve(x,y)'
| | | Call
| | | | ProcedureDesignator -> Name = 'solve'
| | | | ActualArgSpec -> ActualArg -> Expr = 'x'
| | | | | Designator -> DataRef -> Name = 'x'
| | | | ActualArgSpec -> ActualArg -> Expr = 'y'
| | | | | Designator -> DataRef -> Name = 'y'
| | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL solve(x,y,debug=.true._4)'
| | | Call
| | | | ProcedureDesignator -> Name = 'solve'
| | | | ActualArgSpec -> ActualArg -> Expr = 'x'
| | | | | Designator -> DataRef -> Name = 'x'
| | | | ActualArgSpec -> ActualArg -> Expr = 'y'
| | | | | Designator -> DataRef -> Name = 'y'
| | | | ActualArgSpec
| | | | | Keyword -> Name = 'debug'
| | | | | ActualArg -> Expr = '.true._4'
| | | | | | LiteralConstant -> LogicalLiteralConstant
| | | | | | | Bool = 'true'
| | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL solve(x,y,1.e-6_4)'
| | | Call
| | | | ProcedureDesignator -> Name = 'solve'
| | | | ActualArgSpec -> ActualArg -> Expr = 'x'
| | | | | Designator -> DataRef -> Name = 'x'
| | | | ActualArgSpec -> ActualArg -> Expr = 'y'
| | | | | Designator -> DataRef -> Name = 'y'
| | | | ActualArgSpec -> ActualArg -> Expr = '1.e-6_4'
| | | | | LiteralConstant -> RealLiteralConstant
| | | | | | Real = '1.e-6'
| | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL apply(cfg%count)'
| | | Call
| | | | ProcedureDesignator -> Name = 'apply'
| | | | ActualArgSpec -> ActualArg -> Expr = 'cfg%count'
| | | | | Designator -> DataRef -> StructureComponent
| | | | | | DataRef -> Name = 'cfg'
| | | | | | Name = 'count'
| | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL apply(vals(i))'
| | | Call
| | | | ProcedureDesignator -> Name = 'apply'
| | | | ActualArgSpec -> ActualArg -> Expr = 'vals(i)'
| | | | | FunctionReference -> Call
| | | | | | ProcedureDesignator -> Name = 'vals'
| | | | | | ActualArgSpec -> ActualArg -> Expr = 'i'
| | | | | | | Designator -> DataRef -> Name = 'i'
| | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> CallStmt = 'CALL apply(twice(i))'
| | | Call
| | | | ProcedureDesignator -> Name = 'apply'
| | | | ActualArgSpec -> ActualArg -> Expr = 'twice(i)'
| | | | | FunctionReference -> Call
| | | | | | ProcedureDesignator -> Name = 'twice'
| | | | | | ActualArgSpec -> ActualArg -> Expr = 'i'
| | | | | | | Designator -> DataRef -> Name = 'i'
| | ExecutionPartConstruct -> ExecutableConstruct -> ActionStmt -> AssignmentStmt = 'x=sqrt(y)'
| | | Variable -> Designator -> DataRef -> Name = 'x'
| | | Expr = 'sqrt(y)'
| | | | FunctionReference -> Call
| | | | | ProcedureDesignator -> Name = 'sqrt'
| | | | | ActualArgSpec -> ActualArg -> Expr = 'y'
| | | | | | Designator -> DataRef -> Name = 'y'
| EndProgramStmt ->
";

/// A dump with a depth jump and a truncated fragment before the first unit
pub const DAMAGED: &str = "\
======================== Flang: parse tree dump ========================
| | ModuleStmt -> Name = 'lost_fragment'
| | | SpecificationPart
Program -> ProgramUnit -> Module
| ModuleStmt -> Name = 'damaged_mod'
| SpecificationPart
| | | | ImplicitPart ->
| | MysteryConstruct = 'unknown tag'
| ModuleSubprogramPart
| | ContainsStmt
| | ModuleSubprogram -> SubroutineSubprogram
| | | SubroutineStmt
| | | | Name = 'survivor'
| | | ExecutionPart -> Block
| | | EndSubroutineStmt ->
| EndModuleStmt ->
";
