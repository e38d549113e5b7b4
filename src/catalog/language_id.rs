crate::define_catalog_id! {
    /// Language identifier; values outside the catalog are kept as `Custom`
    LanguageId {
        JavaScript => "javascript" : "JavaScript",
        TypeScript => "typescript" : "TypeScript",
        Python => "python" : "Python",
        Go => "go" : "Go",
        Java => "java" : "Java",
        Rust => "rust" : "Rust",
        Php => "php" : "PHP",
        Ruby => "ruby" : "Ruby",
        CSharp => "csharp" : "C#",
        R => "r" : "R",
        Scala => "scala" : "Scala",
        Kotlin => "kotlin" : "Kotlin",
        Dart => "dart" : "Dart",
        Elm => "elm" : "Elm",
        Hcl => "hcl" : "HCL",
        GdScript => "gdscript" : "GDScript",
    }
}

impl Default for LanguageId {
    fn default() -> Self {
        LanguageId::JavaScript
    }
}
