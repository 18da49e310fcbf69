//! Static site copy
//!
//! Everything the pages display. Built once and never mutated; page
//! builders turn it into document elements.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkCategory {
    pub category: String,
    pub projects: Vec<String>,
    pub image: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Audience {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutCopy {
    pub heading: String,
    pub paragraphs: Vec<String>,
    pub registration: String,
    pub what_we_do: Vec<Audience>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeroCopy {
    pub kicker: String,
    pub title_lines: Vec<String>,
    pub tagline: String,
    pub cta: NavLink,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteContent {
    pub brand: String,
    pub nav_links: Vec<NavLink>,
    pub hero_slides: Vec<String>,
    pub hero: HeroCopy,
    pub services: Vec<Service>,
    pub work: Vec<WorkCategory>,
    pub community: Vec<String>,
    pub community_cta: NavLink,
    pub about: AboutCopy,
    pub contact: ContactDetails,
    pub footer: String,
}

fn link(name: &str, href: &str) -> NavLink {
    NavLink {
        name: name.to_string(),
        href: href.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl SiteContent {
    /// Copy with a different set of hero slides
    pub fn with_hero_slides(mut self, slides: Vec<String>) -> Self {
        self.hero_slides = slides;
        self
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            brand: "QI SPORTS".to_string(),
            nav_links: vec![
                link("Home", "/"),
                link("About", "/about"),
                link("Services", "/#services"),
                link("Work", "/#work"),
                link("Contact", "/contact"),
            ],
            hero_slides: strings(&[
                "/images/Amasaza (3).jpg",
                "/images/Amasaza (3).jpg",
                "/images/Amasaza (5).jpg",
            ]),
            hero: HeroCopy {
                kicker: "We are".to_string(),
                title_lines: strings(&["QI", "SPORTS", "MANAGEMENT"]),
                tagline: "Africa next great frontier of sports industry. \
                          We are at the vanguard of this revolution"
                    .to_string(),
                cta: link("Our Services", "/#services"),
            },
            services: vec![
                Service {
                    title: "Marketing & Representation".to_string(),
                    description: "We offer expert guidance to brands and individuals looking to \
                                  participate in African sports or grow their operations through \
                                  sports sponsorships, business partnerships, and investments. We \
                                  enable athletes and teams to optimize earnings from their \
                                  profiles off the field, court, and track."
                        .to_string(),
                },
                Service {
                    title: "Matchmaking".to_string(),
                    description: "We attach brands and organisations to the right projects for \
                                  sponsorship, partnership and social responsibility support, and \
                                  steward these partnerships to ensure optimal delivery and return \
                                  on investment. We vet and train sportspeople, teams and sports \
                                  projects to deliver you well prepared brand ambassadors."
                        .to_string(),
                },
                Service {
                    title: "Sports Project Management".to_string(),
                    description: "We develop and operate our own sports properties, including \
                                  sports events, conferences, media content, and campaigns. We also \
                                  help those who have ideas for sports event or projects to bring \
                                  them to fruition and profitability."
                        .to_string(),
                },
                Service {
                    title: "Research & Advisory".to_string(),
                    description: "Our team possesses expertise in varied fields including sports \
                                  journalism, marketing and research, and we can be contracted to \
                                  carry out market research in any sports related field in Uganda \
                                  and Africa."
                        .to_string(),
                },
                Service {
                    title: "Facilities".to_string(),
                    description: "We work with private sector players to develop, update and \
                                  manage well-planned sports facilities to maximize profitability \
                                  and social impact."
                        .to_string(),
                },
                Service {
                    title: "Social Responsibility".to_string(),
                    description: "We guide brands, organizations and individuals looking to ideate \
                                  and execute sports-driven community initiatives, and provide \
                                  general advisory services on how sports can be best employed to \
                                  deliver Environmental, Social and Governance objectives."
                        .to_string(),
                },
            ],
            work: vec![
                WorkCategory {
                    category: "Sponsorship Management".to_string(),
                    projects: strings(&["StarTimes Falcons", "Amasaza Of Tooro"]),
                    image: "/images/TBI_3228.jpg".to_string(),
                },
                WorkCategory {
                    category: "Events".to_string(),
                    projects: strings(&[
                        "Mbarara Golf Safari 2017",
                        "Mbale Conservation Week",
                        "FNL IX",
                    ]),
                    image: "/images/Amasaza (6).jpg".to_string(),
                },
                WorkCategory {
                    category: "Talent".to_string(),
                    projects: strings(&["Patricia Apolot", "Nobert Okeny", "Ash & Timo Hockey"]),
                    image: "/images/Amasaza (5).jpg".to_string(),
                },
                WorkCategory {
                    category: "Facilities".to_string(),
                    projects: strings(&["Great Outdoors"]),
                    image: "/images/FNL.jpg".to_string(),
                },
                WorkCategory {
                    category: "Media & Content".to_string(),
                    projects: strings(&["7s Rugby", "Social Media"]),
                    image: "/images/TBI_3257.jpg".to_string(),
                },
                WorkCategory {
                    category: "CSR".to_string(),
                    projects: strings(&["Hoops of Hope - Pader district"]),
                    image: "/images/TBI_3257.jpg".to_string(),
                },
            ],
            community: strings(&[
                "We offer technical and material support to Hoops of Hope, a Community \
                 Development Organisation in Pader district started by Mr. Ochan Moses, which \
                 uses basketball as a tool to effect change in Education and Agriculture for the \
                 youth in the community.",
                "This initiative not only fosters athletic skills but also provides crucial life \
                 skills, educational support, and sustainable agricultural practices, \
                 contributing significantly to the well-being and future prospects of the youth \
                 in Pader.",
            ]),
            community_cta: link("Partner With Us", "/contact"),
            about: AboutCopy {
                heading: "About QI Sports".to_string(),
                paragraphs: strings(&[
                    "Founded in 2011, QI SPORTS is a Ugandan-based sports consulting and \
                     development company focused on unlocking opportunities across Africa's \
                     sports industry. We help brands, investors, institutions, and sportspeople \
                     use sports as a strategic tool for growth, impact, and income generation.",
                    "Our services span marketing & representation, matchmaking for sponsorships \
                     and partnerships, sports project management, market research & advisory, \
                     facility development, and social responsibility consulting. We connect the \
                     right people, projects, and ideas - creating value both on and off the pitch.",
                ]),
                registration: "EST: 2011 | REGISTERED: 2013 | UG. REG NO: 170893".to_string(),
                what_we_do: vec![
                    Audience {
                        label: "For Brands".to_string(),
                        text: "We develop strategies, steward campaigns and optimise the value \
                               realized from and impact of your sponsorships and partnerships \
                               using sports and sports-entertainment properties in African markets."
                            .to_string(),
                    },
                    Audience {
                        label: "For Organisations/ Companies".to_string(),
                        text: "We use sports to deliver the highest impact messaging and \
                               experiences for internal audiences, external audiences and \
                               communities, from ideation to implementation."
                            .to_string(),
                    },
                    Audience {
                        label: "For Investors".to_string(),
                        text: "Qi Sports enables you make informed, data-driven and \
                               technology-driven decisions about investing in Ugandan and African \
                               sport, and proceed to steward and manage the performance of your \
                               investments."
                            .to_string(),
                    },
                    Audience {
                        label: "For Sportspeople/ Teams".to_string(),
                        text: "We provide guidance to help orient your career and maximize \
                               earnings from your talent on and off the pitch/ track/ court."
                            .to_string(),
                    },
                ],
                highlights: strings(&[
                    "Startimes Falcon",
                    "Masaza Tooro",
                    "FNL IX",
                    "Mbarara Golf Safari 2017",
                    "Mbale Conversion Week",
                ]),
            },
            contact: ContactDetails {
                email: "info@qisports.com".to_string(),
                phone: "+256 700 000000".to_string(),
                address: "Kampala, Uganda".to_string(),
            },
            footer: "QI SPORTS. All rights reserved.".to_string(),
        }
    }
}
