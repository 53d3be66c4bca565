// Static portfolio content, one record per supported language.
// Used by the terminal for grounding the remote assistant and for demo answers.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub fn tag(self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }

    /// Language name as given to the remote provider
    pub fn name(self) -> &'static str {
        match self {
            Language::Es => "Spanish",
            Language::En => "English",
        }
    }

    /// Pick the string for this language
    pub fn pick(self, es: &'static str, en: &'static str) -> &'static str {
        match self {
            Language::Es => es,
            Language::En => en,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" => Ok(Language::Es),
            "en" => Ok(Language::En),
            other => Err(format!("unsupported language '{}', expected 'es' or 'en'", other)),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Socials {
    pub linkedin: &'static str,
    pub github: &'static str,
    pub twitter: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Personal {
    pub name: &'static str,
    pub title: &'static str,
    pub short_bio: &'static str,
    pub long_bio: &'static str,
    pub location: &'static str,
    pub availability: &'static str,
    pub email: &'static str,
    pub socials: &'static Socials,
}

#[derive(Debug, Serialize)]
pub struct ExperienceItem {
    pub id: &'static str,
    pub period: &'static str,
    pub role: &'static str,
    pub company: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Language,
    Tool,
    Framework,
}

#[derive(Debug, Serialize)]
pub struct SkillItem {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<SkillCategory>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tech_stack: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_link: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_link: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct EducationItem {
    pub id: &'static str,
    pub period: &'static str,
    pub degree: &'static str,
    pub institution: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CertificateItem {
    pub id: &'static str,
    pub title: &'static str,
    pub issuer: &'static str,
    pub date: &'static str,
    pub link: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NavLabels {
    pub about: &'static str,
    pub experience: &'static str,
    pub skills: &'static str,
    pub projects: &'static str,
    pub certificates: &'static str,
    pub contact: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroLabels {
    pub greeting: &'static str,
    pub role: &'static str,
    pub description: &'static str,
    pub cta_project: &'static str,
    pub cta_contact: &'static str,
    #[serde(rename = "ctaCV")]
    pub cta_cv: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SectionLabels {
    pub about: &'static str,
    pub experience: &'static str,
    pub skills: &'static str,
    pub projects: &'static str,
    pub education: &'static str,
    pub certificates: &'static str,
    pub contact: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLabels {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub form_name: &'static str,
    pub form_email: &'static str,
    pub form_message: &'static str,
    pub form_submit: &'static str,
    pub form_sending: &'static str,
    pub success_title: &'static str,
    pub success_message: &'static str,
    pub send_another: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FooterLabels {
    pub rights: &'static str,
    pub designed: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Labels {
    pub nav: NavLabels,
    pub hero: HeroLabels,
    pub sections: SectionLabels,
    pub contact: ContactLabels,
    pub footer: FooterLabels,
}

/// Full content record for one language
#[derive(Debug, Serialize)]
pub struct PortfolioData {
    pub personal: Personal,
    pub experience: &'static [ExperienceItem],
    pub skills: &'static [SkillItem],
    pub projects: &'static [ProjectItem],
    pub education: &'static [EducationItem],
    pub certificates: &'static [CertificateItem],
    pub labels: Labels,
}

/// Content record for the given language
pub fn portfolio(lang: Language) -> &'static PortfolioData {
    match lang {
        Language::Es => &PORTFOLIO_ES,
        Language::En => &PORTFOLIO_EN,
    }
}

// Shared between languages
const EMAIL: &str = "cesarbecerravalencia@gmail.com";

static SOCIALS: Socials = Socials {
    linkedin: "https://www.linkedin.com/in/cesar-becerra-valencia-2bb5751b8/",
    github: "https://github.com/CesarBecVal",
    twitter: "https://x.com/cbecval?s=21",
};

const fn skill(name: &'static str) -> SkillItem {
    SkillItem { name, category: None }
}

static SKILLS: [SkillItem; 13] = [
    skill("Java"),
    skill("Python"),
    skill("Haskell"),
    skill("C"),
    skill("Lean 4"),
    skill("Linux (RedHat/CentOS)"),
    skill("SQL (MySQL/PostgreSQL)"),
    skill("Docker"),
    skill("Git"),
    skill("Global Hits"),
    skill("Zendesk"),
    skill("Bash Scripting"),
    skill("REST APIs"),
];

static CERTIFICATES: [CertificateItem; 4] = [
    CertificateItem {
        id: "c1",
        title: "Introduction to SQL",
        issuer: "DataCamp",
        date: "2025",
        link: "https://www.datacamp.com/completed/statement-of-accomplishment/course/eb264aae756ffa157ae893b107e3fa92268438ca",
    },
    CertificateItem {
        id: "c2",
        title: "Understanding Prompt Engineering",
        issuer: "DataCamp",
        date: "2025",
        link: "https://www.datacamp.com/completed/statement-of-accomplishment/course/80d4e85b550fdc31b2f51bece85771656731b544",
    },
    CertificateItem {
        id: "c3",
        title: "Writing Functions using Java",
        issuer: "CodeSignal",
        date: "2025",
        link: "https://codesignal.com/learn/certificates/cm8uobwga000bnredjott1c6b/courses/36",
    },
    CertificateItem {
        id: "c4",
        title: "Introduction to Git",
        issuer: "DataCamp",
        date: "2025",
        link: "https://www.datacamp.com/completed/statement-of-accomplishment/course/a11fe529853c2fde897fa7896f85e6abe91c6728",
    },
];

static EXPERIENCE_ES: [ExperienceItem; 2] = [
    ExperienceItem {
        id: "1",
        period: "05/2024 — 11/2024",
        company: "Aruss Technologies",
        role: "Analista de Soporte TI / Backend Support",
        description: "Gestión crítica de motores de pago (T1) y soporte a banca móvil. Realicé análisis de logs para detectar patrones de fraude y autenticaciones sospechosas. Colaboración con seguridad para manejo de incidentes en tarjetas y resolución de bugs operativos.",
    },
    ExperienceItem {
        id: "2",
        period: "12/2025 — Presente",
        company: "VLC Marketing",
        role: "Chief Technology Officer (CTO)",
        description: "Responsable del área tecnológica, lidero la ejecución de proyectos digitales y actúo como asesor estratégico para la toma de decisiones técnicas de la empresa con desarrollo web de alto rendimiento.",
    },
];

static EXPERIENCE_EN: [ExperienceItem; 2] = [
    ExperienceItem {
        id: "1",
        period: "05/2024 — 11/2024",
        company: "Aruss Technologies",
        role: "IT Support Analyst / Backend Support",
        description: "Managed critical incidents for payment engines (T1) and mobile banking. Conducted log analysis to detect fraud patterns and suspicious authentications. Collaborated with security teams for card incident management and operational bug resolution.",
    },
    ExperienceItem {
        id: "2",
        period: "12/2025 — Present",
        company: "VLC Marketing",
        role: "Chief Technology Officer (CTO)",
        description: "Responsible for the technology department, I lead the execution of digital projects and serve as a strategic advisor in the company’s technical decision-making, focusing on high-performance web development.",
    },
];

static PROJECTS_ES: [ProjectItem; 2] = [
    ProjectItem {
        id: "p1",
        title: "Portfolio App",
        description: "Sitio personal que muestra proyectos y CV. Animaciones reactivas y diseño minimalista.",
        tech_stack: &["React", "Tailwind", "Vite"],
        demo_link: Some("#"),
        code_link: Some("https://github.com/cesarbecval"),
    },
    ProjectItem {
        id: "p2",
        title: "Configuración de Servidor Linux",
        description: "Despliegue de servicios básicos y configuración de seguridad en entorno RedHat/CentOS.",
        tech_stack: &["Linux", "Bash", "Docker"],
        demo_link: Some("#"),
        code_link: Some("https://github.com/cesarbecval"),
    },
];

static PROJECTS_EN: [ProjectItem; 3] = [
    ProjectItem {
        id: "p1",
        title: "Portfolio App",
        description: "Personal site showcasing projects and CV. Reactive animations and minimalist design.",
        tech_stack: &["React", "Tailwind", "Vite"],
        demo_link: Some("#"),
        code_link: Some("#"),
    },
    ProjectItem {
        id: "p2",
        title: "Financial Dashboard",
        description: "Real-time data visualization for cryptocurrencies using D3.js and WebSockets.",
        tech_stack: &["Next.js", "D3.js", "Firebase"],
        demo_link: Some("#"),
        code_link: Some("#"),
    },
    ProjectItem {
        id: "p3",
        title: "Linux Server Configuration",
        description: "Deployment of basic services and security configuration in RedHat/CentOS environment.",
        tech_stack: &["Linux", "Bash", "Docker"],
        demo_link: Some("#"),
        code_link: Some("https://github.com/cesarbecval"),
    },
];

static EDUCATION_ES: [EducationItem; 2] = [
    EducationItem {
        id: "edu1",
        period: "2024 — Presente",
        degree: "Licenciatura en Ciencias de la Computación",
        institution: "Facultad de Ciencias, UNAM",
    },
    EducationItem {
        id: "edu2",
        period: "2021 — 2024",
        degree: "Técnico Especializado en Computación",
        institution: "Escuela Nacional Preparatoria N. 6, UNAM",
    },
];

static EDUCATION_EN: [EducationItem; 2] = [
    EducationItem {
        id: "edu1",
        period: "2023 — Present",
        degree: "B.S. in Computer Science",
        institution: "Faculty of Science, UNAM",
    },
    EducationItem {
        id: "edu2",
        period: "2020 — 2023",
        degree: "Technical Degree in Computing",
        institution: "Escuela Nacional Preparatoria N. 6, UNAM",
    },
];

static PORTFOLIO_ES: PortfolioData = PortfolioData {
    personal: Personal {
        name: "César Becerra Valencia",
        title: "Desarrollador Web Backend & Java • Estudiante CS UNAM",
        short_bio: "Desarrollador de Software Java Junior y Estudiante de Ciencias de la Computación UNAM. Especializado en Backend, Linux y Seguridad. CTO en VLC Agencia.",
        long_bio: "Soy César Becerra Valencia, Desarrollador Web y Programador Java con base en Nezahualcóyotl, México. Actualmente curso el 4to semestre de Ciencias de la Computación en la UNAM. Cuento con experiencia real como CTO en VLC Agencia y gestionando incidentes críticos de TI. Me apasiona el desarrollo backend, Linux y la seguridad informática.",
        location: "Nezahualcóyotl, Estado de México",
        availability: "Becario / Medio Tiempo",
        email: EMAIL,
        socials: &SOCIALS,
    },
    experience: &EXPERIENCE_ES,
    skills: &SKILLS,
    projects: &PROJECTS_ES,
    education: &EDUCATION_ES,
    certificates: &CERTIFICATES,
    labels: Labels {
        nav: NavLabels {
            about: "Sobre mí",
            experience: "Experiencia",
            skills: "Habilidades",
            projects: "Proyectos",
            certificates: "Certificados",
            contact: "Contacto",
        },
        hero: HeroLabels {
            greeting: "Hola, soy",
            role: "Backend & Seguridad",
            description: "Transformo lógica compleja en sistemas estables.",
            cta_project: "Ver Código",
            cta_contact: "Contáctame",
            cta_cv: "Descargar CV",
        },
        sections: SectionLabels {
            about: "Sobre mí",
            experience: "Experiencia",
            skills: "Habilidades",
            projects: "Proyectos",
            education: "Educación",
            certificates: "Certificaciones",
            contact: "Contacto",
        },
        contact: ContactLabels {
            title: "¿Hablamos de Código?",
            subtitle: "Busco oportunidades como Becario o Jr. donde pueda ensuciarme las manos con servidores, backend o seguridad.",
            form_name: "Nombre",
            form_email: "Correo",
            form_message: "Mensaje",
            form_submit: "Enviar",
            form_sending: "Enviando...",
            success_title: "¡Recibido!",
            success_message: "Gracias por contactarme. Te responderé pronto.",
            send_another: "Enviar otro",
        },
        footer: FooterLabels {
            rights: "Todos los derechos reservados.",
            designed: "Construido con lógica y café por ",
        },
    },
};

static PORTFOLIO_EN: PortfolioData = PortfolioData {
    personal: Personal {
        name: "César Becerra Valencia",
        title: "Junior Backend Java Developer • CS Student UNAM",
        short_bio: "Computer Science Student at UNAM focused on Backend, Linux, and Security. CTO at VLC Agency with experience in critical incident resolution.",
        long_bio: "I'm César Becerra Valencia, a Web Developer and Java Programmer based in Nezahualcóyotl, Mexico. I am a 4th-semester Computer Science student at UNAM. Unlike the average student, I have professional experience as CTO at VLC Agency and managing IT incidents. I am passionate about server-side logic, Linux, and Cloud architecture.",
        location: "Nezahualcóyotl, Mexico State",
        availability: "Internship / Part-time",
        email: EMAIL,
        socials: &SOCIALS,
    },
    experience: &EXPERIENCE_EN,
    skills: &SKILLS,
    projects: &PROJECTS_EN,
    education: &EDUCATION_EN,
    certificates: &CERTIFICATES,
    labels: Labels {
        nav: NavLabels {
            about: "About",
            experience: "Experience",
            skills: "Skills",
            projects: "Projects",
            certificates: "Certificates",
            contact: "Contact",
        },
        hero: HeroLabels {
            greeting: "Hi, I'm",
            role: "Backend & Security",
            description: "I turn complex logic into stable systems.",
            cta_project: "View Projects",
            cta_contact: "Contact Me",
            cta_cv: "Download CV",
        },
        sections: SectionLabels {
            about: "About Me",
            experience: "Experience",
            skills: "Skills",
            projects: "Projects",
            education: "Education",
            certificates: "Certifications",
            contact: "Contact",
        },
        contact: ContactLabels {
            title: "Let's Talk Code",
            subtitle: "I'm looking for Internship or Junior opportunities where I can get my hands dirty with servers, backend, or security.",
            form_name: "Name",
            form_email: "Email",
            form_message: "Message",
            form_submit: "Send",
            form_sending: "Sending...",
            success_title: "Received!",
            success_message: "I'll get back to you ASAP.",
            send_another: "Send another",
        },
        footer: FooterLabels {
            rights: "All rights reserved.",
            designed: "Built with logic and coffee by ",
        },
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parsing() {
        assert_eq!("es".parse::<Language>(), Ok(Language::Es));
        assert_eq!(" EN ".parse::<Language>(), Ok(Language::En));
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(Language::default(), Language::Es);
    }

    #[test]
    fn test_shared_data_is_shared() {
        let es = portfolio(Language::Es);
        let en = portfolio(Language::En);
        assert_eq!(es.personal.email, en.personal.email);
        assert_eq!(es.skills.len(), en.skills.len());
        assert_eq!(es.certificates.len(), 4);
        assert_ne!(es.experience[0].role, en.experience[0].role);
    }

    #[test]
    fn test_serializes_as_camel_case() {
        let json = serde_json::to_string(portfolio(Language::En)).unwrap();
        assert!(json.contains("\"shortBio\""));
        assert!(json.contains("\"techStack\":[\"React\",\"Tailwind\",\"Vite\"]"));
        assert!(json.contains("\"ctaCV\""));
        assert!(!json.contains("\"category\""));
    }
}
