use eframe::egui;

const PRACTICES: &[&str] = &[
    "Use a strong, unique password for each account",
    "Enable two-factor authentication whenever possible",
    "Store passwords securely using a salted, slow hashing algorithm like bcrypt or Argon2",
    "Implement password policies to enforce strong passwords",
    "Regularly update and patch your systems to address vulnerabilities",
];

pub fn render(ui: &mut egui::Ui) {
    ui.heading("Password Security");
    ui.label("Best practices for securing passwords and protecting your users' data.");
    ui.add_space(8.0);
    for p in PRACTICES {
        ui.label(format!("✔ {p}"));
    }

    ui.separator();
    ui.heading("Why Password Security Matters");
    ui.label(
        "Protecting user passwords is crucial for maintaining the integrity and trust \
         of your application. Weak or compromised passwords can lead to data breaches, \
         identity theft and financial loss.",
    );
    ui.add_space(4.0);
    ui.label(
        "A salt makes identical passwords hash to different values. The work factor \
         controls how expensive each hash is, which slows down brute-force attempts \
         against a leaked hash.",
    );
}
