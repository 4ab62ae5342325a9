// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;

/// 目录中的一个页面
///
/// 路径可以携带查询串，名称用于结果展示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    /// 页面路径
    pub path: &'static str,
    /// 页面显示名称
    pub name: &'static str,
}

/// 内置页面目录
///
/// 应用内所有可截图页面的固定清单。声明顺序即派发顺序，
/// 是运行计划确定性的一部分，新增页面只允许追加到对应分组。
pub static DEFAULT_PAGES: Lazy<Vec<PageSpec>> = Lazy::new(|| {
    vec![
        // Public / Landing Pages
        PageSpec { path: "/", name: "Landing Page" },
        PageSpec { path: "/about", name: "Ueber uns" },
        PageSpec { path: "/pricing", name: "Preise" },
        PageSpec { path: "/features", name: "Features" },
        PageSpec { path: "/contact", name: "Kontakt" },
        PageSpec { path: "/blog", name: "Blog" },
        PageSpec { path: "/auth/login", name: "Login" },
        PageSpec { path: "/auth/register", name: "Registrierung" },
        // App - Uebersicht
        PageSpec { path: "/dashboard", name: "Dashboard" },
        PageSpec { path: "/analysis", name: "KI-Analyse" },
        PageSpec { path: "/academy", name: "Academy" },
        // App - Planung & Organisation
        PageSpec { path: "/calendar", name: "Kalender" },
        PageSpec { path: "/dienstplan", name: "Dienstplan" },
        PageSpec { path: "/zeiterfassung", name: "Zeiterfassung" },
        PageSpec { path: "/todos", name: "Aufgaben" },
        PageSpec { path: "/goals", name: "Ziele" },
        PageSpec { path: "/workflows", name: "Workflows" },
        PageSpec { path: "/responsibilities", name: "Zustaendigkeiten" },
        // App - Daten & Dokumente
        PageSpec { path: "/analytics", name: "Kennzahlen" },
        PageSpec { path: "/documents", name: "Dokumente" },
        PageSpec { path: "/practice-insights", name: "Journal" },
        PageSpec { path: "/knowledge", name: "Wissen" },
        PageSpec { path: "/protocols", name: "Protokolle" },
        PageSpec { path: "/cirs", name: "Verbesserungsmeldung" },
        // App - Qualitaets-Management
        PageSpec { path: "/hygieneplan", name: "Hygieneplan" },
        // App - Strategie & Fuehrung
        PageSpec { path: "/strategy-journey", name: "Strategiepfad" },
        PageSpec { path: "/leadership", name: "Leadership" },
        PageSpec { path: "/wellbeing", name: "Mitarbeiter-Wellbeing" },
        PageSpec { path: "/leitbild", name: "Leitbild" },
        PageSpec { path: "/roi-analysis", name: "Lohnt-es-sich-Analyse" },
        PageSpec { path: "/igel-analysis", name: "Selbstzahler-Analyse" },
        PageSpec { path: "/competitor-analysis", name: "Konkurrenzanalyse" },
        PageSpec { path: "/wunschpatient", name: "Wunschpatient" },
        // App - Team & Personal
        PageSpec { path: "/hiring", name: "Personalsuche" },
        PageSpec { path: "/team", name: "Team" },
        PageSpec { path: "/mitarbeitergespraeche", name: "Mitarbeitergespraeche" },
        PageSpec { path: "/selbst-check", name: "Selbst-Check" },
        PageSpec { path: "/skills", name: "Kompetenzen" },
        PageSpec { path: "/organigramm", name: "Organigramm" },
        PageSpec { path: "/training", name: "Fortbildung" },
        // App - Praxis & Einstellungen
        PageSpec { path: "/contacts", name: "Kontakte" },
        PageSpec { path: "/surveys", name: "Umfragen" },
        PageSpec { path: "/arbeitsplaetze", name: "Arbeitsplaetze" },
        PageSpec { path: "/rooms", name: "Raeume" },
        PageSpec { path: "/arbeitsmittel", name: "Arbeitsmittel" },
        PageSpec { path: "/inventory", name: "Material" },
        PageSpec { path: "/devices", name: "Geraete" },
        PageSpec { path: "/settings", name: "Einstellungen" },
        // Super Admin - Uebersicht
        PageSpec { path: "/super-admin", name: "SA Dashboard" },
        // Super Admin - Verwaltung
        PageSpec { path: "/super-admin/tickets", name: "SA Tickets" },
        PageSpec { path: "/super-admin/verwaltung?tab=practices", name: "SA Praxen" },
        PageSpec { path: "/super-admin/verwaltung?tab=users", name: "SA Benutzer" },
        PageSpec { path: "/super-admin/user-rights", name: "SA Benutzerrechte" },
        PageSpec { path: "/super-admin/kpi-kategorien", name: "SA KPI-Kategorien" },
        PageSpec { path: "/super-admin/content?tab=skills", name: "SA Vorlagen: Skills" },
        PageSpec { path: "/super-admin/content?tab=workflows", name: "SA Vorlagen: Workflows" },
        PageSpec { path: "/super-admin/content?tab=checklisten", name: "SA Vorlagen: Checklisten" },
        PageSpec { path: "/super-admin/content?tab=dokumente", name: "SA Vorlagen: Dokumente" },
        PageSpec { path: "/super-admin/content?tab=teams", name: "SA Vorlagen: Teams" },
        PageSpec { path: "/super-admin/content?tab=event-types", name: "SA Vorlagen: Event-Typen" },
        // Super Admin - Content
        PageSpec { path: "/super-admin/academy", name: "SA Academy" },
        PageSpec { path: "/super-admin/waitlist", name: "SA Warteliste" },
        // Super Admin - Finanzen
        PageSpec { path: "/super-admin/zahlungen", name: "SA Zahlungen" },
        // Super Admin - Management
        PageSpec { path: "/super-admin/roadmap", name: "SA Roadmap & Ideen" },
        // Super Admin - Marketing
        PageSpec { path: "/super-admin/social-media", name: "SA Social Media Posts" },
        // Super Admin - Seiten
        PageSpec { path: "/super-admin/landingpages", name: "SA Landingpages" },
        // Super Admin - Testing
        PageSpec { path: "/super-admin/testing", name: "SA UI-Tests" },
        PageSpec { path: "/super-admin/screenshots", name: "SA Screenshots" },
        // Super Admin - System
        PageSpec { path: "/super-admin/system", name: "SA Systemverwaltung" },
        PageSpec { path: "/super-admin/features", name: "SA Feature-Verwaltung" },
        PageSpec { path: "/super-admin/chat-logs", name: "SA Chat-Protokolle" },
        PageSpec { path: "/super-admin/logging", name: "SA Error Logging" },
        PageSpec { path: "/super-admin/settings", name: "SA Admin-Einstellungen" },
    ]
});
