//! Static catalog data: base images, framework presets and domain groupings.
//!
//! Pure data. Lookups live in [`super::registry::TemplateCatalog`].

use super::flavor::DockerfileFlavor;
use super::flavor::DockerfileFlavor::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameworkPreset {
    pub name: &'static str,
    pub language: &'static str,
    pub build_commands: &'static [&'static str],
    pub run_command: &'static str,
    pub port: u16,
    pub flavor: DockerfileFlavor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainTemplate {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub frameworks: &'static [&'static str],
}

/// Domain id that opts a service out of catalog suggestions.
pub const CUSTOM_DOMAIN: &str = "custom";

/// Base image used when a language has no catalog entry.
pub const FALLBACK_BASE_IMAGE: &str = "node:18-alpine";

pub const BASE_IMAGES: &[(&str, &str)] = &[
    ("javascript", "node:18-alpine"),
    ("typescript", "node:18-alpine"),
    ("python", "python:3.11-slim"),
    ("go", "golang:1.21-alpine"),
    ("java", "openjdk:17-jdk-slim"),
    ("rust", "rust:1.70-slim"),
    ("php", "php:8.2-fpm"),
    ("ruby", "ruby:3.2-slim"),
    ("csharp", "mcr.microsoft.com/dotnet/aspnet:7.0"),
    ("r", "r-base:4.3.0"),
    ("scala", "openjdk:11-jre-slim"),
    ("kotlin", "openjdk:17-jdk-slim"),
    ("dart", "cirrusci/flutter:stable"),
    ("elm", "node:18-alpine"),
    ("hcl", "hashicorp/terraform:latest"),
    ("gdscript", "barichello/godot-ci:3.5.1"),
];

const NPM_BUILD: &[&str] = &["npm install", "npm run build"];
const NPM_INSTALL: &[&str] = &["npm install"];
const PIP_INSTALL: &[&str] = &["pip install -r requirements.txt"];
const GO_BUILD: &[&str] = &["go mod download", "go build -o app ."];
const CARGO_RELEASE: &[&str] = &["cargo build --release"];
const DOTNET_PUBLISH: &[&str] = &["dotnet restore", "dotnet publish -c Release -o out"];
const MVN_PACKAGE: &[&str] = &["mvn clean package"];
const BUNDLE_ASSETS: &[&str] = &["bundle install", "bundle exec rake assets:precompile"];
const NONE: &[&str] = &[];

const fn preset(
    name: &'static str,
    language: &'static str,
    build_commands: &'static [&'static str],
    run_command: &'static str,
    port: u16,
    flavor: DockerfileFlavor,
) -> FrameworkPreset {
    FrameworkPreset {
        name,
        language,
        build_commands,
        run_command,
        port,
        flavor,
    }
}

pub const FRAMEWORK_PRESETS: &[FrameworkPreset] = &[
    // Single-page apps, JavaScript
    preset("react", "javascript", NPM_BUILD, "npm start", 3000, Spa),
    preset("vue", "javascript", NPM_BUILD, "npm run serve", 3000, Spa),
    preset("angular", "javascript", NPM_BUILD, "ng serve --host 0.0.0.0", 4200, Spa),
    preset("svelte", "javascript", NPM_BUILD, "npm run dev -- --host 0.0.0.0", 5173, Spa),
    preset("solid.js", "javascript", NPM_BUILD, "npm run dev -- --host 0.0.0.0", 3000, Spa),
    preset("preact", "javascript", NPM_BUILD, "npm run dev -- --host 0.0.0.0", 3000, Spa),
    preset("lit", "javascript", NPM_BUILD, "npm run serve", 8000, Spa),
    preset("alpine.js", "javascript", NPM_BUILD, "npm run serve", 3000, Spa),
    preset("qwik", "javascript", NPM_BUILD, "npm run dev -- --host 0.0.0.0", 5173, Spa),
    // Single-page apps, TypeScript
    preset("react-ts", "typescript", NPM_BUILD, "npm start", 3000, Spa),
    preset("vue-ts", "typescript", NPM_BUILD, "npm run serve", 3000, Spa),
    preset("angular-ts", "typescript", NPM_BUILD, "ng serve --host 0.0.0.0", 4200, Spa),
    preset("svelte-ts", "typescript", NPM_BUILD, "npm run dev -- --host 0.0.0.0", 5173, Spa),
    preset("solid.js-ts", "typescript", NPM_BUILD, "npm run dev -- --host 0.0.0.0", 3000, Spa),
    // Single-page apps, other languages
    preset(
        "flutter web",
        "dart",
        &["flutter pub get", "flutter build web"],
        "flutter run -d web-server --web-port=8080 --web-hostname=0.0.0.0",
        8080,
        Flutter,
    ),
    preset(
        "elm",
        "elm",
        &["elm make src/Main.elm --output=main.js"],
        "elm reactor --port=8000",
        8000,
        Elm,
    ),
    // Server-rendered, JavaScript
    preset("next.js", "javascript", NPM_BUILD, "npm start", 3000, NextJs),
    preset("nuxt", "javascript", NPM_BUILD, "npm start", 3000, NodeJs),
    preset("sveltekit", "javascript", NPM_BUILD, "npm run preview -- --host 0.0.0.0", 4173, NodeJs),
    preset("remix", "javascript", NPM_BUILD, "npm start", 3000, NodeJs),
    preset("astro", "javascript", NPM_BUILD, "npm run start -- --host 0.0.0.0", 3000, NodeJs),
    preset("solid-start", "javascript", NPM_BUILD, "npm start", 3000, NodeJs),
    preset("qwik-city", "javascript", NPM_BUILD, "npm run serve -- --host 0.0.0.0", 3000, NodeJs),
    // Server-rendered, other languages
    preset(
        "django templates",
        "python",
        &[
            "pip install -r requirements.txt",
            "python manage.py collectstatic --noinput",
            "python manage.py migrate",
        ],
        "python manage.py runserver 0.0.0.0:8000",
        8000,
        Python,
    ),
    preset("flask-ssr", "python", PIP_INSTALL, "python app.py", 5000, Python),
    preset(
        "laravel blade",
        "php",
        &[
            "composer install --no-dev",
            "php artisan config:cache",
            "php artisan view:cache",
        ],
        "php artisan serve --host=0.0.0.0 --port=8000",
        8000,
        Php,
    ),
    preset(
        "symfony twig",
        "php",
        &[
            "composer install --no-dev",
            "php bin/console cache:clear",
            "php bin/console assets:install",
        ],
        "php -S 0.0.0.0:8000 -t public",
        8000,
        Php,
    ),
    preset(
        "spring boot thymeleaf",
        "java",
        &["mvn clean package -DskipTests"],
        "java -jar target/app.jar",
        8080,
        Java,
    ),
    preset("asp.net core mvc", "csharp", DOTNET_PUBLISH, "dotnet out/app.dll", 5000, DotNet),
    preset("asp.net core razor", "csharp", DOTNET_PUBLISH, "dotnet out/app.dll", 5000, DotNet),
    preset(
        "ruby on rails views",
        "ruby",
        BUNDLE_ASSETS,
        "bundle exec rails server -b 0.0.0.0",
        3000,
        Ruby,
    ),
    preset("go html/template", "go", GO_BUILD, "./app", 8080, Go),
    preset("gin html", "go", GO_BUILD, "./app", 8080, Go),
    preset("actix-web templates", "rust", CARGO_RELEASE, "./target/release/app", 8080, Rust),
    // Backend APIs
    preset("express", "javascript", NPM_INSTALL, "node server.js", 3000, NodeJs),
    preset("fastify", "javascript", NPM_INSTALL, "node server.js", 3000, NodeJs),
    preset("nestjs", "typescript", NPM_BUILD, "npm run start:prod", 3000, NodeJs),
    preset(
        "django",
        "python",
        &["pip install -r requirements.txt", "python manage.py migrate"],
        "python manage.py runserver 0.0.0.0:8000",
        8000,
        Python,
    ),
    preset("flask", "python", PIP_INSTALL, "python app.py", 5000, Python),
    preset(
        "fastapi",
        "python",
        PIP_INSTALL,
        "uvicorn main:app --host 0.0.0.0 --port 8000",
        8000,
        Python,
    ),
    preset("gin", "go", GO_BUILD, "./app", 8080, Go),
    preset("echo", "go", GO_BUILD, "./app", 8080, Go),
    preset("fiber", "go", GO_BUILD, "./app", 3000, Go),
    preset("spring boot", "java", MVN_PACKAGE, "java -jar target/app.jar", 8080, Java),
    preset(
        "laravel",
        "php",
        &["composer install --no-dev", "php artisan config:cache"],
        "php artisan serve --host=0.0.0.0 --port=8000",
        8000,
        Php,
    ),
    preset(
        "symfony",
        "php",
        &["composer install --no-dev"],
        "php -S 0.0.0.0:8000 -t public",
        8000,
        Php,
    ),
    preset("rails", "ruby", BUNDLE_ASSETS, "bundle exec rails server -b 0.0.0.0", 3000, Ruby),
    preset("sinatra", "ruby", &["bundle install"], "ruby app.rb", 4567, Ruby),
    preset("asp.net core", "csharp", DOTNET_PUBLISH, "dotnet out/app.dll", 5000, DotNet),
    preset("actix-web", "rust", CARGO_RELEASE, "./target/release/app", 8080, Rust),
    preset("warp", "rust", CARGO_RELEASE, "./target/release/app", 3030, Rust),
    preset("rocket", "rust", CARGO_RELEASE, "./target/release/app", 8000, Rust),
    // Data science
    preset(
        "jupyter",
        "python",
        PIP_INSTALL,
        "jupyter notebook --ip=0.0.0.0 --port=8888 --no-browser --allow-root",
        8888,
        Jupyter,
    ),
    preset(
        "streamlit",
        "python",
        PIP_INSTALL,
        "streamlit run app.py --server.port=8501 --server.address=0.0.0.0",
        8501,
        Python,
    ),
    preset("pandas", "python", PIP_INSTALL, "python analysis.py", 8080, Python),
    preset("plotly", "python", PIP_INSTALL, "python dashboard.py", 8050, Python),
    // AI / ML
    preset("pytorch", "python", PIP_INSTALL, "python train.py", 8000, Python),
    preset("tensorflow", "python", PIP_INSTALL, "python train.py", 8000, Python),
    preset("scikit-learn", "python", PIP_INSTALL, "python model.py", 8000, Python),
    preset("hugging face", "python", PIP_INSTALL, "python transformers_app.py", 8000, Python),
    // Data engineering
    preset("apache airflow", "python", PIP_INSTALL, "airflow webserver --port 8080", 8080, Python),
    preset("prefect", "python", PIP_INSTALL, "prefect server start", 4200, Python),
    preset("dbt", "python", PIP_INSTALL, "dbt serve --host 0.0.0.0 --port 8080", 8080, Python),
    preset("pyspark", "python", PIP_INSTALL, "python spark_job.py", 4040, Python),
    preset("kafka-python", "python", PIP_INSTALL, "python kafka_consumer.py", 8080, Python),
    preset("apache-beam-python", "python", PIP_INSTALL, "python beam_pipeline.py", 8080, Python),
    preset("superset", "python", PIP_INSTALL, "superset run -h 0.0.0.0 -p 8088", 8088, Python),
    preset("kafka", "java", MVN_PACKAGE, "java -jar target/kafka-app.jar", 9092, Java),
    preset("apache flink", "java", MVN_PACKAGE, "java -jar target/flink-app.jar", 8081, Java),
    preset(
        "elasticsearch",
        "java",
        MVN_PACKAGE,
        "java -jar target/elasticsearch-client.jar",
        9200,
        Java,
    ),
    preset("spark", "scala", &["sbt compile"], "sbt run", 4040, Scala),
    // Cybersecurity
    preset("scapy", "python", PIP_INSTALL, "python packet_analyzer.py", 8080, Python),
    preset("nmap-python", "python", PIP_INSTALL, "python scanner.py", 8080, Python),
    preset("burp-suite", "python", PIP_INSTALL, "python security_scanner.py", 8080, Python),
    // DevOps and monitoring
    preset(
        "grafana",
        "custom",
        NONE,
        "grafana-server --config=/etc/grafana/grafana.ini",
        3000,
        Grafana,
    ),
    preset(
        "prometheus",
        "custom",
        NONE,
        "prometheus --config.file=/etc/prometheus/prometheus.yml",
        9090,
        Prometheus,
    ),
    preset("ansible", "python", PIP_INSTALL, "ansible-playbook playbook.yml", 8080, Python),
    preset("terraform", "hcl", NONE, "terraform apply", 8080, Terraform),
    preset("jenkins", "java", MVN_PACKAGE, "java -jar target/jenkins-pipeline.jar", 8080, Java),
    // Mobile
    preset("react native", "javascript", NPM_INSTALL, "npm start", 19000, NodeJs),
    preset("expo", "javascript", NPM_INSTALL, "expo start", 19000, NodeJs),
    preset(
        "flutter",
        "dart",
        &["flutter pub get"],
        "flutter run -d web-server --web-port=8080",
        8080,
        Flutter,
    ),
    // Gaming
    preset("unity", "csharp", &["dotnet restore", "dotnet build"], "dotnet run", 7777, DotNet),
    preset("godot", "gdscript", NONE, "godot --headless --server", 7777, Godot),
];

pub const DOMAIN_TEMPLATES: &[DomainTemplate] = &[
    DomainTemplate {
        id: "web-frontend",
        label: "Frontend Web",
        description: "Client-side web applications (SPA)",
        frameworks: &[
            "react",
            "vue",
            "angular",
            "svelte",
            "solid.js",
            "preact",
            "lit",
            "alpine.js",
            "qwik",
            "react-ts",
            "vue-ts",
            "angular-ts",
            "svelte-ts",
            "solid.js-ts",
            "flutter web",
            "elm",
        ],
    },
    DomainTemplate {
        id: "web-fullstack",
        label: "Frontend Fullstack",
        description: "Server-rendered web applications",
        frameworks: &[
            "next.js",
            "nuxt",
            "sveltekit",
            "remix",
            "astro",
            "solid-start",
            "qwik-city",
            "django templates",
            "flask-ssr",
            "laravel blade",
            "symfony twig",
            "spring boot thymeleaf",
            "asp.net core mvc",
            "asp.net core razor",
            "ruby on rails views",
            "go html/template",
            "gin html",
            "actix-web templates",
        ],
    },
    DomainTemplate {
        id: "web-backend",
        label: "Backend API",
        description: "REST/GraphQL APIs and microservices",
        frameworks: &[
            "express",
            "fastify",
            "nestjs",
            "django",
            "flask",
            "fastapi",
            "gin",
            "echo",
            "fiber",
            "spring boot",
            "laravel",
            "symfony",
            "rails",
            "sinatra",
            "asp.net core",
            "actix-web",
            "warp",
            "rocket",
        ],
    },
    DomainTemplate {
        id: "data-science",
        label: "Data Science",
        description: "Data analysis, notebooks and visualisation",
        frameworks: &["jupyter", "streamlit", "pandas", "plotly"],
    },
    DomainTemplate {
        id: "ai-ml",
        label: "Artificial Intelligence",
        description: "Machine learning and deep learning",
        frameworks: &["pytorch", "tensorflow", "scikit-learn", "hugging face"],
    },
    DomainTemplate {
        id: "data-engineering",
        label: "Data Engineering",
        description: "ETL, pipelines and big data",
        frameworks: &[
            "apache airflow",
            "prefect",
            "dbt",
            "pyspark",
            "kafka-python",
            "apache-beam-python",
            "superset",
            "kafka",
            "apache flink",
            "elasticsearch",
            "spark",
        ],
    },
    DomainTemplate {
        id: "cybersecurity",
        label: "Cybersecurity",
        description: "Security analysis and penetration testing",
        frameworks: &["scapy", "nmap-python", "burp-suite"],
    },
    DomainTemplate {
        id: "devops",
        label: "DevOps / Infrastructure",
        description: "Automation, CI/CD and monitoring",
        frameworks: &["grafana", "prometheus", "ansible", "terraform", "jenkins"],
    },
    DomainTemplate {
        id: "mobile",
        label: "Mobile",
        description: "Cross-platform mobile applications",
        frameworks: &["react native", "expo", "flutter"],
    },
    DomainTemplate {
        id: "gaming",
        label: "Gaming",
        description: "Game engines",
        frameworks: &["unity", "godot"],
    },
    DomainTemplate {
        id: CUSTOM_DOMAIN,
        label: "Manual Configuration",
        description: "Every field is configured by hand",
        frameworks: &[],
    },
];
