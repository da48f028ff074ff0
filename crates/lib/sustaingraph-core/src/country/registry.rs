/// One ISO 3166-1 entry with the names a lookup may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryRecord {
    pub alpha3: &'static str,
    pub name: &'static str,
    pub official_name: Option<&'static str>,
    pub common_name: Option<&'static str>,
}

const fn plain(alpha3: &'static str, name: &'static str) -> CountryRecord {
    CountryRecord {
        alpha3,
        name,
        official_name: None,
        common_name: None,
    }
}

const fn official(alpha3: &'static str, name: &'static str, official: &'static str) -> CountryRecord {
    CountryRecord {
        alpha3,
        name,
        official_name: Some(official),
        common_name: None,
    }
}

const fn full(
    alpha3: &'static str,
    name: &'static str,
    official: Option<&'static str>,
    common: &'static str,
) -> CountryRecord {
    CountryRecord {
        alpha3,
        name,
        official_name: official,
        common_name: Some(common),
    }
}

pub static COUNTRIES: &[CountryRecord] = &[
    official("AFG", "Afghanistan", "Islamic Republic of Afghanistan"),
    plain("ALA", "Åland Islands"),
    official("ALB", "Albania", "Republic of Albania"),
    official("DZA", "Algeria", "People's Democratic Republic of Algeria"),
    plain("ASM", "American Samoa"),
    official("AND", "Andorra", "Principality of Andorra"),
    official("AGO", "Angola", "Republic of Angola"),
    plain("AIA", "Anguilla"),
    plain("ATA", "Antarctica"),
    plain("ATG", "Antigua and Barbuda"),
    official("ARG", "Argentina", "Argentine Republic"),
    official("ARM", "Armenia", "Republic of Armenia"),
    plain("ABW", "Aruba"),
    plain("AUS", "Australia"),
    official("AUT", "Austria", "Republic of Austria"),
    official("AZE", "Azerbaijan", "Republic of Azerbaijan"),
    official("BHS", "Bahamas", "Commonwealth of the Bahamas"),
    official("BHR", "Bahrain", "Kingdom of Bahrain"),
    official("BGD", "Bangladesh", "People's Republic of Bangladesh"),
    plain("BRB", "Barbados"),
    official("BLR", "Belarus", "Republic of Belarus"),
    official("BEL", "Belgium", "Kingdom of Belgium"),
    plain("BLZ", "Belize"),
    official("BEN", "Benin", "Republic of Benin"),
    plain("BMU", "Bermuda"),
    official("BTN", "Bhutan", "Kingdom of Bhutan"),
    full(
        "BOL",
        "Bolivia, Plurinational State of",
        Some("Plurinational State of Bolivia"),
        "Bolivia",
    ),
    official(
        "BES",
        "Bonaire, Sint Eustatius and Saba",
        "Bonaire, Sint Eustatius and Saba",
    ),
    official(
        "BIH",
        "Bosnia and Herzegovina",
        "Republic of Bosnia and Herzegovina",
    ),
    official("BWA", "Botswana", "Republic of Botswana"),
    plain("BVT", "Bouvet Island"),
    official("BRA", "Brazil", "Federative Republic of Brazil"),
    plain("IOT", "British Indian Ocean Territory"),
    plain("BRN", "Brunei Darussalam"),
    official("BGR", "Bulgaria", "Republic of Bulgaria"),
    plain("BFA", "Burkina Faso"),
    official("BDI", "Burundi", "Republic of Burundi"),
    official("CPV", "Cabo Verde", "Republic of Cabo Verde"),
    official("KHM", "Cambodia", "Kingdom of Cambodia"),
    official("CMR", "Cameroon", "Republic of Cameroon"),
    plain("CAN", "Canada"),
    plain("CYM", "Cayman Islands"),
    plain("CAF", "Central African Republic"),
    official("TCD", "Chad", "Republic of Chad"),
    official("CHL", "Chile", "Republic of Chile"),
    official("CHN", "China", "People's Republic of China"),
    plain("CXR", "Christmas Island"),
    plain("CCK", "Cocos (Keeling) Islands"),
    official("COL", "Colombia", "Republic of Colombia"),
    official("COM", "Comoros", "Union of the Comoros"),
    official("COG", "Congo", "Republic of the Congo"),
    plain("COD", "Congo, The Democratic Republic of the"),
    plain("COK", "Cook Islands"),
    official("CRI", "Costa Rica", "Republic of Costa Rica"),
    official("CIV", "Côte d'Ivoire", "Republic of Côte d'Ivoire"),
    official("HRV", "Croatia", "Republic of Croatia"),
    official("CUB", "Cuba", "Republic of Cuba"),
    official("CUW", "Curaçao", "Curaçao"),
    official("CYP", "Cyprus", "Republic of Cyprus"),
    official("CZE", "Czechia", "Czech Republic"),
    official("DNK", "Denmark", "Kingdom of Denmark"),
    official("DJI", "Djibouti", "Republic of Djibouti"),
    official("DMA", "Dominica", "Commonwealth of Dominica"),
    plain("DOM", "Dominican Republic"),
    official("ECU", "Ecuador", "Republic of Ecuador"),
    official("EGY", "Egypt", "Arab Republic of Egypt"),
    official("SLV", "El Salvador", "Republic of El Salvador"),
    official("GNQ", "Equatorial Guinea", "Republic of Equatorial Guinea"),
    official("ERI", "Eritrea", "the State of Eritrea"),
    official("EST", "Estonia", "Republic of Estonia"),
    official("SWZ", "Eswatini", "Kingdom of Eswatini"),
    official("ETH", "Ethiopia", "Federal Democratic Republic of Ethiopia"),
    plain("FLK", "Falkland Islands (Malvinas)"),
    plain("FRO", "Faroe Islands"),
    official("FJI", "Fiji", "Republic of Fiji"),
    official("FIN", "Finland", "Republic of Finland"),
    official("FRA", "France", "French Republic"),
    plain("GUF", "French Guiana"),
    plain("PYF", "French Polynesia"),
    plain("ATF", "French Southern Territories"),
    official("GAB", "Gabon", "Gabonese Republic"),
    official("GMB", "Gambia", "Republic of the Gambia"),
    plain("GEO", "Georgia"),
    official("DEU", "Germany", "Federal Republic of Germany"),
    official("GHA", "Ghana", "Republic of Ghana"),
    plain("GIB", "Gibraltar"),
    official("GRC", "Greece", "Hellenic Republic"),
    plain("GRL", "Greenland"),
    plain("GRD", "Grenada"),
    plain("GLP", "Guadeloupe"),
    plain("GUM", "Guam"),
    official("GTM", "Guatemala", "Republic of Guatemala"),
    plain("GGY", "Guernsey"),
    official("GIN", "Guinea", "Republic of Guinea"),
    official("GNB", "Guinea-Bissau", "Republic of Guinea-Bissau"),
    official("GUY", "Guyana", "Republic of Guyana"),
    official("HTI", "Haiti", "Republic of Haiti"),
    plain("HMD", "Heard Island and McDonald Islands"),
    plain("VAT", "Holy See (Vatican City State)"),
    official("HND", "Honduras", "Republic of Honduras"),
    official(
        "HKG",
        "Hong Kong",
        "Hong Kong Special Administrative Region of China",
    ),
    plain("HUN", "Hungary"),
    official("ISL", "Iceland", "Republic of Iceland"),
    official("IND", "India", "Republic of India"),
    official("IDN", "Indonesia", "Republic of Indonesia"),
    full(
        "IRN",
        "Iran, Islamic Republic of",
        Some("Islamic Republic of Iran"),
        "Iran",
    ),
    official("IRQ", "Iraq", "Republic of Iraq"),
    plain("IRL", "Ireland"),
    plain("IMN", "Isle of Man"),
    official("ISR", "Israel", "State of Israel"),
    official("ITA", "Italy", "Italian Republic"),
    plain("JAM", "Jamaica"),
    plain("JPN", "Japan"),
    plain("JEY", "Jersey"),
    official("JOR", "Jordan", "Hashemite Kingdom of Jordan"),
    official("KAZ", "Kazakhstan", "Republic of Kazakhstan"),
    official("KEN", "Kenya", "Republic of Kenya"),
    official("KIR", "Kiribati", "Republic of Kiribati"),
    full(
        "PRK",
        "Korea, Democratic People's Republic of",
        Some("Democratic People's Republic of Korea"),
        "North Korea",
    ),
    full("KOR", "Korea, Republic of", None, "South Korea"),
    official("KWT", "Kuwait", "State of Kuwait"),
    official("KGZ", "Kyrgyzstan", "Kyrgyz Republic"),
    full("LAO", "Lao People's Democratic Republic", None, "Laos"),
    official("LVA", "Latvia", "Republic of Latvia"),
    official("LBN", "Lebanon", "Lebanese Republic"),
    official("LSO", "Lesotho", "Kingdom of Lesotho"),
    official("LBR", "Liberia", "Republic of Liberia"),
    official("LBY", "Libya", "Libya"),
    official("LIE", "Liechtenstein", "Principality of Liechtenstein"),
    official("LTU", "Lithuania", "Republic of Lithuania"),
    official("LUX", "Luxembourg", "Grand Duchy of Luxembourg"),
    official(
        "MAC",
        "Macao",
        "Macao Special Administrative Region of China",
    ),
    official("MDG", "Madagascar", "Republic of Madagascar"),
    official("MWI", "Malawi", "Republic of Malawi"),
    plain("MYS", "Malaysia"),
    official("MDV", "Maldives", "Republic of Maldives"),
    official("MLI", "Mali", "Republic of Mali"),
    official("MLT", "Malta", "Republic of Malta"),
    official("MHL", "Marshall Islands", "Republic of the Marshall Islands"),
    plain("MTQ", "Martinique"),
    official("MRT", "Mauritania", "Islamic Republic of Mauritania"),
    official("MUS", "Mauritius", "Republic of Mauritius"),
    plain("MYT", "Mayotte"),
    official("MEX", "Mexico", "United Mexican States"),
    official(
        "FSM",
        "Micronesia, Federated States of",
        "Federated States of Micronesia",
    ),
    full(
        "MDA",
        "Moldova, Republic of",
        Some("Republic of Moldova"),
        "Moldova",
    ),
    official("MCO", "Monaco", "Principality of Monaco"),
    plain("MNG", "Mongolia"),
    official("MNE", "Montenegro", "Montenegro"),
    plain("MSR", "Montserrat"),
    official("MAR", "Morocco", "Kingdom of Morocco"),
    official("MOZ", "Mozambique", "Republic of Mozambique"),
    official("MMR", "Myanmar", "Republic of Myanmar"),
    official("NAM", "Namibia", "Republic of Namibia"),
    official("NRU", "Nauru", "Republic of Nauru"),
    official("NPL", "Nepal", "Federal Democratic Republic of Nepal"),
    official("NLD", "Netherlands", "Kingdom of the Netherlands"),
    plain("NCL", "New Caledonia"),
    plain("NZL", "New Zealand"),
    official("NIC", "Nicaragua", "Republic of Nicaragua"),
    official("NER", "Niger", "Republic of the Niger"),
    official("NGA", "Nigeria", "Federal Republic of Nigeria"),
    official("NIU", "Niue", "Niue"),
    plain("NFK", "Norfolk Island"),
    official("MKD", "North Macedonia", "Republic of North Macedonia"),
    official(
        "MNP",
        "Northern Mariana Islands",
        "Commonwealth of the Northern Mariana Islands",
    ),
    official("NOR", "Norway", "Kingdom of Norway"),
    official("OMN", "Oman", "Sultanate of Oman"),
    official("PAK", "Pakistan", "Islamic Republic of Pakistan"),
    official("PLW", "Palau", "Republic of Palau"),
    official("PSE", "Palestine, State of", "the State of Palestine"),
    official("PAN", "Panama", "Republic of Panama"),
    official("PNG", "Papua New Guinea", "Independent State of Papua New Guinea"),
    official("PRY", "Paraguay", "Republic of Paraguay"),
    official("PER", "Peru", "Republic of Peru"),
    official("PHL", "Philippines", "Republic of the Philippines"),
    plain("PCN", "Pitcairn"),
    official("POL", "Poland", "Republic of Poland"),
    official("PRT", "Portugal", "Portuguese Republic"),
    plain("PRI", "Puerto Rico"),
    official("QAT", "Qatar", "State of Qatar"),
    plain("REU", "Réunion"),
    plain("ROU", "Romania"),
    plain("RUS", "Russian Federation"),
    official("RWA", "Rwanda", "Rwandese Republic"),
    plain("BLM", "Saint Barthélemy"),
    plain("SHN", "Saint Helena, Ascension and Tristan da Cunha"),
    plain("KNA", "Saint Kitts and Nevis"),
    plain("LCA", "Saint Lucia"),
    plain("MAF", "Saint Martin (French part)"),
    plain("SPM", "Saint Pierre and Miquelon"),
    plain("VCT", "Saint Vincent and the Grenadines"),
    official("WSM", "Samoa", "Independent State of Samoa"),
    official("SMR", "San Marino", "Republic of San Marino"),
    official(
        "STP",
        "Sao Tome and Principe",
        "Democratic Republic of Sao Tome and Principe",
    ),
    official("SAU", "Saudi Arabia", "Kingdom of Saudi Arabia"),
    official("SEN", "Senegal", "Republic of Senegal"),
    official("SRB", "Serbia", "Republic of Serbia"),
    official("SYC", "Seychelles", "Republic of Seychelles"),
    official("SLE", "Sierra Leone", "Republic of Sierra Leone"),
    official("SGP", "Singapore", "Republic of Singapore"),
    official(
        "SXM",
        "Sint Maarten (Dutch part)",
        "Sint Maarten (Dutch part)",
    ),
    official("SVK", "Slovakia", "Slovak Republic"),
    official("SVN", "Slovenia", "Republic of Slovenia"),
    plain("SLB", "Solomon Islands"),
    official("SOM", "Somalia", "Federal Republic of Somalia"),
    official("ZAF", "South Africa", "Republic of South Africa"),
    plain("SGS", "South Georgia and the South Sandwich Islands"),
    official("SSD", "South Sudan", "Republic of South Sudan"),
    official("ESP", "Spain", "Kingdom of Spain"),
    official(
        "LKA",
        "Sri Lanka",
        "Democratic Socialist Republic of Sri Lanka",
    ),
    official("SDN", "Sudan", "Republic of the Sudan"),
    official("SUR", "Suriname", "Republic of Suriname"),
    plain("SJM", "Svalbard and Jan Mayen"),
    official("SWE", "Sweden", "Kingdom of Sweden"),
    official("CHE", "Switzerland", "Swiss Confederation"),
    full("SYR", "Syrian Arab Republic", None, "Syria"),
    full("TWN", "Taiwan, Province of China", None, "Taiwan"),
    official("TJK", "Tajikistan", "Republic of Tajikistan"),
    full(
        "TZA",
        "Tanzania, United Republic of",
        Some("United Republic of Tanzania"),
        "Tanzania",
    ),
    official("THA", "Thailand", "Kingdom of Thailand"),
    official("TLS", "Timor-Leste", "Democratic Republic of Timor-Leste"),
    official("TGO", "Togo", "Togolese Republic"),
    plain("TKL", "Tokelau"),
    official("TON", "Tonga", "Kingdom of Tonga"),
    official("TTO", "Trinidad and Tobago", "Republic of Trinidad and Tobago"),
    official("TUN", "Tunisia", "Republic of Tunisia"),
    official("TUR", "Türkiye", "Republic of Türkiye"),
    plain("TKM", "Turkmenistan"),
    plain("TCA", "Turks and Caicos Islands"),
    plain("TUV", "Tuvalu"),
    official("UGA", "Uganda", "Republic of Uganda"),
    plain("UKR", "Ukraine"),
    plain("ARE", "United Arab Emirates"),
    official(
        "GBR",
        "United Kingdom",
        "United Kingdom of Great Britain and Northern Ireland",
    ),
    official("USA", "United States", "United States of America"),
    plain("UMI", "United States Minor Outlying Islands"),
    official("URY", "Uruguay", "Eastern Republic of Uruguay"),
    official("UZB", "Uzbekistan", "Republic of Uzbekistan"),
    official("VUT", "Vanuatu", "Republic of Vanuatu"),
    full(
        "VEN",
        "Venezuela, Bolivarian Republic of",
        Some("Bolivarian Republic of Venezuela"),
        "Venezuela",
    ),
    full(
        "VNM",
        "Viet Nam",
        Some("Socialist Republic of Viet Nam"),
        "Vietnam",
    ),
    official("VGB", "Virgin Islands, British", "British Virgin Islands"),
    official("VIR", "Virgin Islands, U.S.", "Virgin Islands of the United States"),
    plain("WLF", "Wallis and Futuna"),
    plain("ESH", "Western Sahara"),
    official("YEM", "Yemen", "Republic of Yemen"),
    official("ZMB", "Zambia", "Republic of Zambia"),
    official("ZWE", "Zimbabwe", "Republic of Zimbabwe"),
];

/// Names whose registry match is wrong or missing in survey data.
pub static OVERRIDES: &[(&str, Option<&str>)] = &[
    ("Kosovo", None),
    ("North Cyprus", None),
    ("Russia", Some("RUS")),
    ("Hong Kong S.A.R. of China", Some("HKG")),
    ("Ivory Coast", Some("CIV")),
    ("Laos", Some("LAO")),
    ("Iran", Some("IRN")),
    ("Palestinian Territories", Some("PSE")),
    ("Eswatini, Kingdom of", None),
    ("Congo (Brazzaville)", Some("COG")),
    ("Swaziland", Some("SWZ")),
];
